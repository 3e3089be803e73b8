// src/admin/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::wizard::state::FinalStatus;

/// The backend collections the console manages. Everything here is owned and
/// persisted by the backend; the client only holds transient copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Users,
    KycLevels,
    KycDetails,
    UserKycDetails,
    Countries,
    Provinces,
    Cities,
    IsdCodes,
    OccupationsProfessions,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::KycLevels => "kyc_levels",
            Resource::KycDetails => "kyc_details",
            Resource::UserKycDetails => "user_kyc_details",
            Resource::Countries => "countries",
            Resource::Provinces => "provinces",
            Resource::Cities => "cities",
            Resource::IsdCodes => "isdcodes",
            Resource::OccupationsProfessions => "occupations-professions",
        }
    }

    /// Server-side ORDER BY is unreliable for the taxonomy collection, so
    /// its listing never sends sort parameters and sorts the fetched page
    /// locally instead.
    pub fn sorts_client_side(&self) -> bool {
        matches!(self, Resource::OccupationsProfessions)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFilter {
    pub field: String,
    pub value: String,
}

/// One page request as the enhanced listing endpoint understands it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListQuery {
    pub page: usize,
    pub page_size: usize,
    pub fetch_all: bool,
    pub search: Option<String>,
    pub sort_field: Option<String>,
    pub sort_order: SortOrder,
    pub filters: Vec<FieldFilter>,
}

impl ListQuery {
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size,
            fetch_all: false,
            search: None,
            sort_field: None,
            sort_order: SortOrder::Asc,
            filters: Vec::new(),
        }
    }

    /// A query for the whole collection in one response.
    pub fn fetch_all() -> Self {
        Self { fetch_all: true, ..Self::new(1) }
    }

    pub(crate) fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("page_size", self.page_size.to_string()),
            ("fetch_all", self.fetch_all.to_string()),
        ];
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if let Some(field) = &self.sort_field {
            pairs.push(("sort_by", format!("{}:{}", field, self.sort_order)));
        }
        for filter in &self.filters {
            pairs.push(("filters", format!("{}={}", filter.field, filter.value)));
        }
        pairs
    }
}

/// One page of results with the backend-supplied pagination facts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KycLevel {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub level: i32,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KycDetail {
    pub id: Uuid,
    pub kyc_level_id: Uuid,
    pub name: String,
    pub required: bool,
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserKycLevel {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kyc_level_id: Uuid,
    pub status: FinalStatus,
    pub achieved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserKycDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kyc_detail_id: Uuid,
    pub status: FinalStatus,
    pub risk_score: Option<u8>,
    pub verified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Province {
    pub id: Uuid,
    pub country_code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: Uuid,
    pub province_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsdCode {
    pub code: String,
    pub country_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupationProfession {
    pub id: Uuid,
    pub occupation: String,
    pub profession: String,
    pub risk_category: Option<String>,
}

/// Countries with their provinces and cities, fetched together for the
/// address form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceData {
    pub countries: Vec<Country>,
    pub provinces: Vec<Province>,
    pub cities: Vec<City>,
}
