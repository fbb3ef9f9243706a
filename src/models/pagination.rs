//! Estruturas de paginação das listagens administrativas

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: Some(1),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.map(|p| p as i64),
            limit: limit.map(|l| l as i64),
        }
    }

    pub fn get_offset(&self) -> i64 {
        let page = self.page.unwrap_or(1).max(1);
        (page - 1) * self.get_limit()
    }

    pub fn get_limit(&self) -> i64 {
        self.limit.unwrap_or(20).max(1)
    }

    pub fn get_page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Paginacao {
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub pages: i64,
}

impl Paginacao {
    pub fn new(total: i64, page: i64, limit: i64) -> Self {
        let pages = (total + limit - 1) / limit;
        Self {
            total,
            page,
            limit,
            pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_e_limit() {
        let params = PaginationParams::new(Some(3), Some(10));
        assert_eq!(params.get_offset(), 20);
        assert_eq!(params.get_limit(), 10);

        let defaults = PaginationParams::new(None, None);
        assert_eq!(defaults.get_offset(), 0);
        assert_eq!(defaults.get_limit(), 20);
    }

    #[test]
    fn test_paginacao_arredonda_pages_para_cima() {
        let p = Paginacao::new(41, 1, 20);
        assert_eq!(p.pages, 3);

        let exato = Paginacao::new(40, 1, 20);
        assert_eq!(exato.pages, 2);
    }
}
