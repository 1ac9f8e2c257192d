//! Shapes aggregate statistics into chart-ready series for the dashboard.

use serde::Serialize;

use crate::models::card::CardKind;
use crate::services::stats::{CardStats, PositionKindCount, TopPlayer};

/// Parallel label/value arrays for a single-series chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<i64>,
}

impl ChartSeries {
    fn from_pairs(pairs: impl IntoIterator<Item = (String, i64)>) -> Self {
        let (labels, data): (Vec<String>, Vec<i64>) = pairs.into_iter().unzip();
        Self { labels, data }
    }
}

/// One stack layer of a stacked bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedDataset {
    pub label: String,
    pub data: Vec<i64>,
}

/// Stacked bar chart: shared x labels, one dataset per stack layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackedSeries {
    pub labels: Vec<String>,
    pub datasets: Vec<StackedDataset>,
}

/// Headline figures shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSummary {
    pub yellow_cards: i64,
    pub red_cards: i64,
    pub total_players: i64,
    pub avg_cards_per_match: f64,
    pub top_player: Option<TopPlayer>,
    /// `Amarelo` only when yellow cards strictly outnumber red ones.
    pub dominant_kind: CardKind,
}

/// Every chart of the dashboard, precomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCharts {
    pub summary: ChartSummary,
    pub by_type: ChartSeries,
    pub by_position: ChartSeries,
    pub by_club: ChartSeries,
    pub by_time: ChartSeries,
    pub by_round: ChartSeries,
    pub type_by_position: StackedSeries,
}

pub fn build(stats: &CardStats) -> DashboardCharts {
    DashboardCharts {
        summary: summarize(stats),
        by_type: ChartSeries::from_pairs(
            stats
                .cards_by_type
                .iter()
                .map(|row| (row.cartao.clone(), row.count)),
        ),
        by_position: ChartSeries::from_pairs(
            stats
                .cards_by_position
                .iter()
                .map(|row| (row.posicao.clone(), row.count)),
        ),
        by_club: ChartSeries::from_pairs(
            stats
                .cards_by_club
                .iter()
                .map(|row| (row.clube.clone(), row.count)),
        ),
        by_time: ChartSeries::from_pairs(
            stats
                .cards_by_time
                .iter()
                .map(|row| (row.periodo.clone(), row.count)),
        ),
        by_round: ChartSeries::from_pairs(
            stats
                .cards_by_round
                .iter()
                .map(|row| (format!("Rodada {}", row.rodata), row.count)),
        ),
        type_by_position: stack_by_position(&stats.cards_type_by_position),
    }
}

fn summarize(stats: &CardStats) -> ChartSummary {
    let count_of = |kind: CardKind| {
        stats
            .cards_by_type
            .iter()
            .find(|row| row.cartao == kind.as_str())
            .map_or(0, |row| row.count)
    };
    let yellow_cards = count_of(CardKind::Yellow);
    let red_cards = count_of(CardKind::Red);

    ChartSummary {
        yellow_cards,
        red_cards,
        total_players: stats.total_players,
        avg_cards_per_match: stats.avg_cards_per_match,
        top_player: stats.top_player.clone(),
        dominant_kind: if yellow_cards > red_cards {
            CardKind::Yellow
        } else {
            CardKind::Red
        },
    }
}

/// Pivot (position, kind, count) rows into one dataset per card kind.
///
/// Positions and kinds keep first-seen order; missing pairs count as zero.
pub fn stack_by_position(rows: &[PositionKindCount]) -> StackedSeries {
    let mut positions: Vec<&str> = Vec::new();
    let mut kinds: Vec<&str> = Vec::new();
    for row in rows {
        if !positions.contains(&row.posicao.as_str()) {
            positions.push(&row.posicao);
        }
        if !kinds.contains(&row.cartao.as_str()) {
            kinds.push(&row.cartao);
        }
    }

    let datasets = kinds
        .iter()
        .map(|kind| StackedDataset {
            label: kind.to_string(),
            data: positions
                .iter()
                .map(|position| {
                    rows.iter()
                        .find(|row| row.posicao == *position && row.cartao == *kind)
                        .map_or(0, |row| row.count)
                })
                .collect(),
        })
        .collect();

    StackedSeries {
        labels: positions.iter().map(|p| p.to_string()).collect(),
        datasets,
    }
}
