use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]{3,32}$").expect("Invalid username regex"));

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

pub fn validate_username(username: &str) -> Result<(), &'static str> {
    // 3-32 位，只能包含字母、数字、下划线、点或连字符
    if !USERNAME_RE.is_match(username) {
        return Err(
            "Username must be 3-32 characters of letters, numbers, underscores, dots or hyphens",
        );
    }
    Ok(())
}

pub fn validate_title(title: &str) -> Result<(), &'static str> {
    if title.trim().is_empty() {
        return Err("Title must not be blank");
    }
    Ok(())
}

pub fn validate_rating(rating: i32) -> Result<(), &'static str> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err("Rating must be between 1 and 5");
    }
    Ok(())
}

pub fn validate_file_path(file: &str) -> Result<(), &'static str> {
    if file.trim().is_empty() {
        return Err("File path must not be blank");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_username() {
        assert!(validate_username("admin").is_ok());
        assert!(validate_username("jane.doe-2").is_ok());
        assert!(validate_username("ab").is_err());
        assert!(validate_username(&"a".repeat(33)).is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("名字很长的用户").is_err());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Rust 101").is_ok());
        assert!(validate_title("   ").is_err());
        assert!(validate_title("").is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(6).is_err());
        assert!(validate_rating(-1).is_err());
    }

    #[test]
    fn test_validate_file_path() {
        assert!(validate_file_path("uploads/answer.zip").is_ok());
        assert!(validate_file_path(" ").is_err());
    }
}
