use serde::{Deserialize, Serialize};

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;
// 保证 (page - 1) * size 不超出 i64
const MAX_PAGE: i64 = i64::MAX / MAX_PAGE_SIZE;

// 分页查询参数
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}

impl ListQuery {
    /// 规范化后的页码（从 1 开始）
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).clamp(1, MAX_PAGE) as u64
    }

    /// 规范化后的每页条数
    pub fn size(&self) -> u64 {
        self.size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE) as u64
    }
}

// 分页响应信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub page: i64,
    pub page_size: i64,
    pub total: i64,
    pub total_pages: i64,
}

// 分页列表响应
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = ListQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.size(), 10);
    }

    #[test]
    fn test_clamping() {
        let query = ListQuery {
            page: Some(-3),
            size: Some(1000),
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.size(), 100);

        let query = ListQuery {
            page: Some(4),
            size: Some(0),
        };
        assert_eq!(query.page(), 4);
        assert_eq!(query.size(), 1);
    }

    #[test]
    fn test_huge_page_offset_fits() {
        let query = ListQuery {
            page: Some(i64::MAX),
            size: Some(i64::MAX),
        };
        let offset = (query.page() - 1).checked_mul(query.size());
        assert!(offset.is_some_and(|offset| offset <= i64::MAX as u64));
    }
}
