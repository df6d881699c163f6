use regex::Regex;
use std::sync::LazyLock;

pub type Validator = Box<dyn Fn(&str) -> Result<(), String> + Send + Sync>;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern"));
static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]*\.?[0-9]+$").expect("decimal pattern"));

/// First error among `validators`, in order.
pub fn run_validators(validators: &[Validator], value: &str) -> Result<(), String> {
    for validator in validators {
        validator(value)?;
    }
    Ok(())
}

pub fn required(message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.trim().is_empty() {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

pub fn email(message: impl Into<String>) -> Validator {
    pattern(&EMAIL, message)
}

pub fn decimal(message: impl Into<String>) -> Validator {
    pattern(&DECIMAL, message)
}

pub fn contains(needle: &'static str, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.contains(needle) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

pub fn starts_with(prefix: &'static str, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.starts_with(prefix) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

pub fn max_chars(max: usize, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if value.chars().count() > max {
            Err(message.clone())
        } else {
            Ok(())
        }
    })
}

/// Runs `inner` only when the value is non-blank.
pub fn optional(inner: Validator) -> Validator {
    Box::new(move |value: &str| {
        if value.trim().is_empty() {
            Ok(())
        } else {
            inner(value)
        }
    })
}

fn pattern(re: &'static LazyLock<Regex>, message: impl Into<String>) -> Validator {
    let message = message.into();
    Box::new(move |value: &str| {
        if re.is_match(value) {
            Ok(())
        } else {
            Err(message.clone())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_accepts_simple_shapes_only() {
        let v = email("bad");
        assert!(v("jane@example.com").is_ok());
        assert!(v("a@b.c").is_ok());
        assert_eq!(v("jane@example"), Err("bad".to_string()));
        assert!(v("jane example@x.com").is_err());
        assert!(v("").is_err());
    }

    #[test]
    fn decimal_allows_single_point() {
        let v = decimal("nan");
        assert!(v("3.8").is_ok());
        assert!(v(".5").is_ok());
        assert!(v("4").is_ok());
        assert!(v("3.").is_err());
        assert!(v("3.8.1").is_err());
        assert!(v("abc").is_err());
    }

    #[test]
    fn optional_skips_blank_values() {
        let v = optional(contains("linkedin.com", "need linkedin"));
        assert!(v("").is_ok());
        assert!(v("   ").is_ok());
        assert!(v("https://linkedin.com/in/jane").is_ok());
        assert!(v("https://example.com").is_err());
    }

    #[test]
    fn run_validators_reports_first_failure() {
        let validators = vec![required("required"), max_chars(3, "too long")];
        assert_eq!(run_validators(&validators, ""), Err("required".to_string()));
        assert_eq!(
            run_validators(&validators, "abcd"),
            Err("too long".to_string())
        );
        assert!(run_validators(&validators, "abc").is_ok());
    }
}
