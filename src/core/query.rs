//! GraphQL request construction for the ut.no cabin search
//!
//! Holds the endpoint configuration and builds the `FindCabins` request body.

use serde::Serialize;

/// Public ut.no GraphQL endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.ut.no";

/// The API refuses pages larger than this
pub const DEFAULT_PAGE_SIZE: u32 = 500;

/// Upper bound on requested pages; a few pages cover the whole cabin list
pub const DEFAULT_MAX_PAGES: usize = 100;

/// The API answers browser-like clients only
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:123.0) Gecko/20100101 Firefox/123.0";

const OPERATION_NAME: &str = "FindCabins";

const FIND_CABINS_QUERY: &str = r#"query FindCabins($input: NTB_FindCabinsInput) {
  ntb_findCabins(input: $input) {
    totalCount
    pageInfo {
      hasNextPage
      endCursor
      __typename
    }
    edges {
      node {
        ...CabinFragment
        __typename
      }
      __typename
    }
    __typename
  }
}

fragment CabinFragment on NTB_Cabin {
  id
  name
  serviceLevel
  bedsToday
  bedsStaffed
  bedsNoService
  bedsSelfService
  bedsWinter
  dntCabin
  owner {
    name
    __typename
  }
  accessibilities {
    id
    name
    __typename
  }
  openingHours {
    allYear
    from
    to
    serviceLevel
    key
    __typename
  }
  geometry
  media {
    id
    uri
    type
    description
    tags
    __typename
  }
  areas {
    id
    name
    __typename
  }
  __typename
}
"#;

/// Configuration for the cabin API
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// GraphQL endpoint URL
    pub endpoint: String,

    /// Cabins requested per page
    pub page_size: u32,

    /// Only cabins whose `dntCabin` flag equals this value are returned
    pub dnt_cabin: bool,

    /// `User-Agent` header sent with every request
    pub user_agent: String,

    /// Safety bound on the number of pages requested
    pub max_pages: usize,

    /// Optional per-request timeout; requests wait indefinitely when unset
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            dnt_cabin: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_pages: DEFAULT_MAX_PAGES,
            timeout_secs: None,
        }
    }
}

/// Body of one `FindCabins` POST request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindCabinsRequest<'a> {
    operation_name: &'static str,
    variables: Variables<'a>,
    query: &'static str,
}

#[derive(Debug, Serialize)]
struct Variables<'a> {
    input: FindCabinsInput<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FindCabinsInput<'a> {
    page_options: PageOptions<'a>,
    filters: Filters,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageOptions<'a> {
    limit: u32,
    after_cursor: Option<&'a str>,
    order_by_direction: &'static str,
    order_by: &'static str,
}

#[derive(Debug, Serialize)]
struct Filters {
    and: [DntCabinFilter; 1],
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DntCabinFilter {
    dnt_cabin: FlagValue,
}

#[derive(Debug, Serialize)]
struct FlagValue {
    value: bool,
}

impl<'a> FindCabinsRequest<'a> {
    /// Builds the request for the page following `after_cursor` (`None` for the first page)
    pub fn new(config: &ApiConfig, after_cursor: Option<&'a str>) -> Self {
        Self {
            operation_name: OPERATION_NAME,
            variables: Variables {
                input: FindCabinsInput {
                    page_options: PageOptions {
                        limit: config.page_size,
                        after_cursor,
                        order_by_direction: "DESC",
                        order_by: "ID",
                    },
                    filters: Filters {
                        and: [DntCabinFilter {
                            dnt_cabin: FlagValue {
                                value: config.dnt_cabin,
                            },
                        }],
                    },
                },
            },
            query: FIND_CABINS_QUERY,
        }
    }
}
