//! Card listing: filter predicates, paginated retrieval and the filter catalog.

use serde::{Deserialize, Serialize};
use sqlx::MySqlPool;

use crate::errors::AppError;
use crate::models::card::CardEvent;
use crate::models::pagination::{lenient_i64, non_blank, PageInfo, Pagination};

/// Columns selected for a card record. Casts keep decoding stable whatever
/// integer width or text type the imported table uses.
const RECORD_COLUMNS: &str = "CAST(id AS SIGNED) AS id, cartao, atleta, clube, posicao, \
     CAST(minuto AS CHAR) AS minuto, CAST(partida_id AS SIGNED) AS partida_id, \
     CAST(rodata AS SIGNED) AS rodata, CAST(num_camisa AS SIGNED) AS num_camisa";

/// Escape character used in LIKE patterns (portable across SQL modes).
const LIKE_ESCAPE: char = '!';

/// Listing filters, as received in the query string. Blank or unparseable
/// values are dropped during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardFilters {
    /// Exact card kind (`Amarelo` / `Vermelho`).
    #[serde(default, deserialize_with = "non_blank")]
    pub cartao: Option<String>,
    /// Case-insensitive substring of the club name.
    #[serde(default, deserialize_with = "non_blank")]
    pub clube: Option<String>,
    /// Exact position label.
    #[serde(default, deserialize_with = "non_blank")]
    pub posicao: Option<String>,
    /// Case-insensitive substring of the player name.
    #[serde(default, deserialize_with = "non_blank")]
    pub atleta: Option<String>,
    /// Inclusive lower bound on the (numeric) minute.
    #[serde(default, rename = "minutoMin", deserialize_with = "lenient_i64")]
    pub minuto_min: Option<i64>,
    /// Inclusive upper bound on the (numeric) minute.
    #[serde(default, rename = "minutoMax", deserialize_with = "lenient_i64")]
    pub minuto_max: Option<i64>,
    /// Exact round number.
    #[serde(default, deserialize_with = "lenient_i64")]
    pub rodata: Option<i64>,
}

impl CardFilters {
    /// Whether no filter is active.
    pub fn is_empty(&self) -> bool {
        self.cartao.is_none()
            && self.clube.is_none()
            && self.posicao.is_none()
            && self.atleta.is_none()
            && self.minuto_min.is_none()
            && self.minuto_max.is_none()
            && self.rodata.is_none()
    }
}

/// A value bound to a `?` placeholder of the generated WHERE clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Int(i64),
}

/// WHERE clause plus its bind values, in placeholder order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhereClause {
    pub sql: String,
    pub binds: Vec<FilterValue>,
}

/// Build the parameterized WHERE clause for a filter set.
///
/// Text predicates compare under `utf8mb4_0900_bin` (binary, NO PAD) whatever
/// collation the table was created with: equality is exact, and substring
/// matches are case-insensitive only through `LOWER`, never accent-folded.
pub fn where_clause(filters: &CardFilters) -> WhereClause {
    let mut conditions: Vec<&'static str> = Vec::new();
    let mut binds: Vec<FilterValue> = Vec::new();

    if let Some(ref kind) = filters.cartao {
        conditions.push("cartao COLLATE utf8mb4_0900_bin = ?");
        binds.push(FilterValue::Text(kind.clone()));
    }
    if let Some(ref club) = filters.clube {
        conditions.push("LOWER(clube) COLLATE utf8mb4_0900_bin LIKE ? ESCAPE '!'");
        binds.push(FilterValue::Text(contains_pattern(club)));
    }
    if let Some(ref position) = filters.posicao {
        conditions.push("posicao COLLATE utf8mb4_0900_bin = ?");
        binds.push(FilterValue::Text(position.clone()));
    }
    if let Some(ref player) = filters.atleta {
        conditions.push("LOWER(atleta) COLLATE utf8mb4_0900_bin LIKE ? ESCAPE '!'");
        binds.push(FilterValue::Text(contains_pattern(player)));
    }
    if let Some(min) = filters.minuto_min {
        conditions.push("(minuto REGEXP '^[0-9]+$' AND CAST(minuto AS SIGNED) >= ?)");
        binds.push(FilterValue::Int(min));
    }
    if let Some(max) = filters.minuto_max {
        conditions.push("(minuto REGEXP '^[0-9]+$' AND CAST(minuto AS SIGNED) <= ?)");
        binds.push(FilterValue::Int(max));
    }
    if let Some(round) = filters.rodata {
        conditions.push("rodata = ?");
        binds.push(FilterValue::Int(round));
    }

    let sql = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    WhereClause { sql, binds }
}

/// Lower-cased `%needle%` pattern with LIKE wildcards escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Distinct values per filterable field, used to populate filter pickers.
/// Serializes as `{}` when empty (the catalog is skipped under active filters).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cartao: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub clube: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub posicao: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rodata: Vec<i64>,
}

/// One page of the card listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPage {
    pub records: Vec<CardEvent>,
    pub pagination: PageInfo,
    pub filter_options: FilterOptions,
}

/// List cards matching `filters`, newest match first, one page at a time.
pub async fn list(
    pool: &MySqlPool,
    filters: &CardFilters,
    pagination: &Pagination,
) -> Result<CardPage, AppError> {
    let clause = where_clause(filters);

    let count_sql = format!("SELECT COUNT(*) FROM cartoes {}", clause.sql);
    let data_sql = format!(
        "SELECT {RECORD_COLUMNS} FROM cartoes {} \
         ORDER BY partida_id DESC, id DESC \
         LIMIT {} OFFSET {}",
        clause.sql,
        pagination.limit(),
        pagination.offset()
    );

    let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
    let mut data_query = sqlx::query_as::<_, CardEvent>(&data_sql);

    macro_rules! bind_both {
        ($val:expr) => {
            count_query = count_query.bind($val);
            data_query = data_query.bind($val);
        };
    }

    for value in &clause.binds {
        match value {
            FilterValue::Text(text) => {
                bind_both!(text.as_str());
            }
            FilterValue::Int(number) => {
                bind_both!(*number);
            }
        }
    }

    let (total, records) = tokio::try_join!(
        count_query.fetch_one(pool),
        data_query.fetch_all(pool),
    )?;

    // The catalog reflects the whole table; it is not narrowed by filters.
    let filter_options = if filters.is_empty() {
        fetch_filter_options(pool).await?
    } else {
        FilterOptions::default()
    };

    tracing::debug!(
        total,
        returned = records.len(),
        page = pagination.current_page(),
        "Listed cards"
    );

    Ok(CardPage {
        records,
        pagination: PageInfo::new(total, pagination),
        filter_options,
    })
}

/// Fetch the distinct values of every filterable field.
pub async fn fetch_filter_options(pool: &MySqlPool) -> Result<FilterOptions, AppError> {
    let (cartao, clube, posicao, rodata) = tokio::try_join!(
        sqlx::query_scalar::<_, String>("SELECT DISTINCT cartao FROM cartoes ORDER BY cartao")
            .fetch_all(pool),
        sqlx::query_scalar::<_, String>("SELECT DISTINCT clube FROM cartoes ORDER BY clube")
            .fetch_all(pool),
        sqlx::query_scalar::<_, String>("SELECT DISTINCT posicao FROM cartoes ORDER BY posicao")
            .fetch_all(pool),
        sqlx::query_scalar::<_, i64>(
            "SELECT DISTINCT CAST(rodata AS SIGNED) AS round_number FROM cartoes ORDER BY round_number",
        )
        .fetch_all(pool),
    )?;

    Ok(FilterOptions {
        cartao,
        clube,
        posicao,
        rodata,
    })
}
