//! Aggregate card statistics over the whole championship table.

use serde::Serialize;
use sqlx::MySqlPool;

use crate::errors::AppError;
use crate::models::card::TimeBucket;

/// The nine dashboard aggregations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardStats {
    pub cards_by_type: Vec<KindCount>,
    pub cards_by_club: Vec<ClubCount>,
    pub cards_by_position: Vec<PositionCount>,
    pub cards_by_time: Vec<PeriodCount>,
    pub cards_by_round: Vec<RoundCount>,
    pub cards_type_by_position: Vec<PositionKindCount>,
    pub top_player: Option<TopPlayer>,
    pub total_players: i64,
    pub avg_cards_per_match: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct KindCount {
    pub cartao: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct ClubCount {
    pub clube: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct PositionCount {
    pub posicao: String,
    pub count: i64,
}

/// Card count for one 15-minute period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodCount {
    pub periodo: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct RoundCount {
    pub rodata: i64,
    pub count: i64,
}

/// Card count for a (position, card kind) pair.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct PositionKindCount {
    pub posicao: String,
    pub cartao: String,
    pub count: i64,
}

/// Player with the most cards, with the yellow/red breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct TopPlayer {
    pub atleta: String,
    pub count: i64,
    pub amarelos: i64,
    pub vermelhos: i64,
}

/// Cards counted at one exact numeric minute.
#[derive(Debug, sqlx::FromRow)]
struct MinuteCount {
    minute_number: i64,
    count: i64,
}

/// Totals behind the per-match average.
#[derive(Debug, sqlx::FromRow)]
struct MatchTotals {
    total_cards: i64,
    matches: i64,
}

/// Run every aggregation concurrently; any failure fails the whole request.
pub async fn get_stats(pool: &MySqlPool) -> Result<CardStats, AppError> {
    let (
        cards_by_type,
        cards_by_club,
        cards_by_position,
        minute_counts,
        cards_by_round,
        cards_type_by_position,
        top_player,
        total_players,
        match_totals,
    ) = tokio::try_join!(
        fetch_cards_by_type(pool),
        fetch_cards_by_club(pool),
        fetch_cards_by_position(pool),
        fetch_minute_counts(pool),
        fetch_cards_by_round(pool),
        fetch_cards_type_by_position(pool),
        fetch_top_player(pool),
        fetch_total_players(pool),
        fetch_match_totals(pool),
    )?;

    Ok(CardStats {
        cards_by_type,
        cards_by_club,
        cards_by_position,
        cards_by_time: bucket_minutes(
            minute_counts.iter().map(|row| (row.minute_number, row.count)),
        ),
        cards_by_round,
        cards_type_by_position,
        top_player,
        total_players,
        avg_cards_per_match: average_per_match(match_totals.total_cards, match_totals.matches),
    })
}

/// Fold per-minute counts into the seven periods, chronologically, zero-filled.
pub fn bucket_minutes(counts: impl IntoIterator<Item = (i64, i64)>) -> Vec<PeriodCount> {
    let mut totals = [0i64; TimeBucket::ALL.len()];
    for (minute, count) in counts {
        if minute < 0 {
            continue;
        }
        totals[TimeBucket::for_minute(minute) as usize] += count;
    }

    TimeBucket::ALL
        .iter()
        .zip(totals)
        .map(|(bucket, count)| PeriodCount {
            periodo: bucket.label().to_string(),
            count,
        })
        .collect()
}

/// Mean cards per match, rounded to two decimals; zero when no match exists.
pub fn average_per_match(total_cards: i64, matches: i64) -> f64 {
    if matches <= 0 {
        return 0.0;
    }
    let avg = total_cards as f64 / matches as f64;
    (avg * 100.0).round() / 100.0
}

async fn fetch_cards_by_type(pool: &MySqlPool) -> Result<Vec<KindCount>, sqlx::Error> {
    sqlx::query_as::<_, KindCount>(
        r#"
        SELECT cartao, COUNT(*) AS count
        FROM cartoes
        GROUP BY cartao
        ORDER BY cartao
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Top 10 clubs by card count.
async fn fetch_cards_by_club(pool: &MySqlPool) -> Result<Vec<ClubCount>, sqlx::Error> {
    sqlx::query_as::<_, ClubCount>(
        r#"
        SELECT clube, COUNT(*) AS count
        FROM cartoes
        GROUP BY clube
        ORDER BY count DESC, clube ASC
        LIMIT 10
        "#,
    )
    .fetch_all(pool)
    .await
}

async fn fetch_cards_by_position(pool: &MySqlPool) -> Result<Vec<PositionCount>, sqlx::Error> {
    sqlx::query_as::<_, PositionCount>(
        r#"
        SELECT posicao, COUNT(*) AS count
        FROM cartoes
        GROUP BY posicao
        ORDER BY count DESC, posicao ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Counts per numeric minute; non-numeric minutes are left out.
async fn fetch_minute_counts(pool: &MySqlPool) -> Result<Vec<MinuteCount>, sqlx::Error> {
    sqlx::query_as::<_, MinuteCount>(
        r#"
        SELECT CAST(minuto AS SIGNED) AS minute_number, COUNT(*) AS count
        FROM cartoes
        WHERE minuto REGEXP '^[0-9]+$'
        GROUP BY minute_number
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Top 15 rounds by card count.
async fn fetch_cards_by_round(pool: &MySqlPool) -> Result<Vec<RoundCount>, sqlx::Error> {
    sqlx::query_as::<_, RoundCount>(
        r#"
        SELECT CAST(rodata AS SIGNED) AS rodata, COUNT(*) AS count
        FROM cartoes
        GROUP BY 1
        ORDER BY count DESC, rodata ASC
        LIMIT 15
        "#,
    )
    .fetch_all(pool)
    .await
}

async fn fetch_cards_type_by_position(
    pool: &MySqlPool,
) -> Result<Vec<PositionKindCount>, sqlx::Error> {
    sqlx::query_as::<_, PositionKindCount>(
        r#"
        SELECT posicao, cartao, COUNT(*) AS count
        FROM cartoes
        GROUP BY posicao, cartao
        ORDER BY posicao, cartao
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Player with the most cards. Ties go to the player holding the lowest record id.
async fn fetch_top_player(pool: &MySqlPool) -> Result<Option<TopPlayer>, sqlx::Error> {
    sqlx::query_as::<_, TopPlayer>(
        r#"
        SELECT
            atleta,
            COUNT(*) AS count,
            CAST(COALESCE(SUM(CASE WHEN cartao = 'Amarelo'  THEN 1 ELSE 0 END), 0) AS SIGNED) AS amarelos,
            CAST(COALESCE(SUM(CASE WHEN cartao = 'Vermelho' THEN 1 ELSE 0 END), 0) AS SIGNED) AS vermelhos
        FROM cartoes
        GROUP BY atleta
        ORDER BY count DESC, MIN(id) ASC
        LIMIT 1
        "#,
    )
    .fetch_optional(pool)
    .await
}

async fn fetch_total_players(pool: &MySqlPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(DISTINCT atleta) FROM cartoes")
        .fetch_one(pool)
        .await
}

async fn fetch_match_totals(pool: &MySqlPool) -> Result<MatchTotals, sqlx::Error> {
    // SUM over an integer column yields DECIMAL in MySQL; cast back to BIGINT.
    sqlx::query_as::<_, MatchTotals>(
        r#"
        SELECT
            CAST(COALESCE(SUM(per_match.cards), 0) AS SIGNED) AS total_cards,
            COUNT(*) AS matches
        FROM (
            SELECT partida_id, COUNT(*) AS cards
            FROM cartoes
            GROUP BY partida_id
        ) AS per_match
        "#,
    )
    .fetch_one(pool)
    .await
}
