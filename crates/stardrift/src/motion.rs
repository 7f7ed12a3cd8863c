//! Reduced-motion preference lookup.

use stardrift_config::Config;
use stardrift_core::Motion;

/// Environment variable requesting reduced motion.
pub const REDUCE_MOTION_ENV: &str = "REDUCE_MOTION";

/// Resolve the motion preference. The configuration wins when it sets
/// `reduced_motion`; otherwise the environment decides.
pub fn detect(config: &Config) -> Motion {
    let env = std::env::var(REDUCE_MOTION_ENV).ok();
    resolve(config.reduced_motion, env.as_deref())
}

fn resolve(configured: Option<bool>, env: Option<&str>) -> Motion {
    let reduced = configured.unwrap_or_else(|| env.is_some_and(is_truthy));
    Motion::from_reduced(reduced)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_values() {
        assert_eq!(resolve(None, Some("1")), Motion::Reduced);
        assert_eq!(resolve(None, Some(" TRUE ")), Motion::Reduced);
        assert_eq!(resolve(None, Some("on")), Motion::Reduced);
        assert_eq!(resolve(None, Some("0")), Motion::Full);
        assert_eq!(resolve(None, Some("")), Motion::Full);
        assert_eq!(resolve(None, None), Motion::Full);
    }

    #[test]
    fn test_config_overrides_env() {
        assert_eq!(resolve(Some(false), Some("1")), Motion::Full);
        assert_eq!(resolve(Some(true), None), Motion::Reduced);
    }
}
