use std::time::Duration;

#[cfg(test)]
use crate::pal::FakePlatform;
use crate::pal::Platform;
use crate::pal::real::RealPlatform;

/// Dispatches clock readings to either the real or (in tests) a fake platform.
#[derive(Clone, Debug)]
pub(crate) enum PlatformFacade {
    Real(RealPlatform),

    #[cfg(test)]
    Fake(FakePlatform),
}

impl PlatformFacade {
    pub(crate) fn real() -> Self {
        Self::Real(RealPlatform::new())
    }

    #[cfg(test)]
    pub(crate) fn fake(platform: FakePlatform) -> Self {
        Self::Fake(platform)
    }
}

impl Platform for PlatformFacade {
    fn now(&self) -> Duration {
        match self {
            Self::Real(platform) => platform.now(),
            #[cfg(test)]
            Self::Fake(platform) => platform.now(),
        }
    }
}
