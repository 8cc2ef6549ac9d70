//! 路径参数提取器

use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

/// 定义从路径参数解析正整数 ID 的提取器
///
/// 非数字或非正数的 ID 无法对应任何记录，统一返回 404。
macro_rules! define_safe_i64_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                ready(parse_positive_id(req.match_info().get($param)).map($name))
            }
        }
    };
}

define_safe_i64_extractor!(SafeIDI64, "id");

fn parse_positive_id(raw: Option<&str>) -> Result<i64, actix_web::Error> {
    match raw.and_then(|s| s.parse::<i64>().ok()) {
        Some(id) if id > 0 => Ok(id),
        _ => Err(InternalError::from_response(
            "invalid path id",
            HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::NotFound, "Not found")),
        )
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_positive_id() {
        assert_eq!(parse_positive_id(Some("12")).ok(), Some(12));
        assert!(parse_positive_id(Some("0")).is_err());
        assert!(parse_positive_id(Some("-4")).is_err());
        assert!(parse_positive_id(Some("abc")).is_err());
        assert!(parse_positive_id(None).is_err());
    }
}
