/// Discord caps the per-user rate limit at six hours.
pub const MAX_RATE_LIMIT_SECS: u16 = 21_600;

pub fn validate(seconds: u16) -> Result<u16, String> {
    if seconds > MAX_RATE_LIMIT_SECS {
        return Err(format!(
            "Slowmode must be between 0 and {MAX_RATE_LIMIT_SECS} seconds."
        ));
    }
    Ok(seconds)
}

pub fn describe(seconds: u16) -> String {
    match seconds {
        0 => "disabled".to_string(),
        1 => "1 second".to_string(),
        n => format!("{n} seconds"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert_eq!(validate(0), Ok(0));
        assert_eq!(validate(MAX_RATE_LIMIT_SECS), Ok(MAX_RATE_LIMIT_SECS));
        assert!(validate(MAX_RATE_LIMIT_SECS + 1).is_err());
    }

    #[test]
    fn descriptions() {
        assert_eq!(describe(0), "disabled");
        assert_eq!(describe(1), "1 second");
        assert_eq!(describe(30), "30 seconds");
    }
}
