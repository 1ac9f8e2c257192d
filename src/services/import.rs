//! CSV import of championship card data into the `cartoes` table.

use std::io::Read;

use serde::Deserialize;
use sqlx::MySqlPool;

/// One CSV row. Every column is read as text so blank cells can be detected
/// before any numeric conversion.
#[derive(Debug, Clone, Deserialize)]
struct CsvRow {
    cartao: String,
    atleta: String,
    clube: String,
    posicao: String,
    minuto: String,
    partida_id: String,
    rodata: String,
    num_camisa: String,
}

/// A card ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCard {
    pub cartao: String,
    pub atleta: String,
    pub clube: String,
    pub posicao: String,
    pub minuto: String,
    pub partida_id: i64,
    pub rodata: i64,
    pub num_camisa: i64,
}

/// Parsed CSV content.
#[derive(Debug, Default)]
pub struct ImportBatch {
    pub cards: Vec<NewCard>,
    /// Rows dropped for blank cells or non-numeric id columns.
    pub skipped: usize,
}

impl ImportBatch {
    pub fn processed(&self) -> usize {
        self.cards.len() + self.skipped
    }
}

/// Read a headed CSV. Extra columns (such as an `id` column) are ignored.
pub fn read_csv<R: Read>(reader: R) -> Result<ImportBatch, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut batch = ImportBatch::default();
    for result in csv_reader.deserialize::<CsvRow>() {
        match to_card(result?) {
            Some(card) => batch.cards.push(card),
            None => batch.skipped += 1,
        }
    }
    Ok(batch)
}

fn to_card(row: CsvRow) -> Option<NewCard> {
    let text = [
        &row.cartao,
        &row.atleta,
        &row.clube,
        &row.posicao,
        &row.minuto,
        &row.partida_id,
        &row.rodata,
        &row.num_camisa,
    ];
    if text.iter().any(|value| value.is_empty()) {
        return None;
    }

    Some(NewCard {
        partida_id: row.partida_id.parse().ok()?,
        rodata: row.rodata.parse().ok()?,
        num_camisa: row.num_camisa.parse().ok()?,
        cartao: row.cartao,
        atleta: row.atleta,
        clube: row.clube,
        posicao: row.posicao,
        minuto: row.minuto,
    })
}

/// Insert every card of the batch inside a single transaction.
pub async fn insert_batch(pool: &MySqlPool, cards: &[NewCard]) -> Result<u64, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut inserted = 0u64;

    for card in cards {
        let result = sqlx::query(
            "INSERT INTO cartoes (cartao, atleta, clube, posicao, minuto, partida_id, rodata, num_camisa)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&card.cartao)
        .bind(&card.atleta)
        .bind(&card.clube)
        .bind(&card.posicao)
        .bind(&card.minuto)
        .bind(card.partida_id)
        .bind(card.rodata)
        .bind(card.num_camisa)
        .execute(&mut *tx)
        .await?;
        inserted += result.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}
