use deadpool_postgres::Pool;
use uuid::Uuid;
use crate::error::Result;

/// The fixed wilaya reference table: (code, name, default delivery fee in DZD).
///
/// Fees here are only the initial values; the admin panel mutates them
/// afterwards. The list covers the 58 provinces of the 2019 redistricting.
pub const WILAYAS: &[(&str, &str, i64)] = &[
    ("01", "Adrar", 900),
    ("02", "Chlef", 450),
    ("03", "Laghouat", 600),
    ("04", "Oum El Bouaghi", 500),
    ("05", "Batna", 500),
    ("06", "Béjaïa", 450),
    ("07", "Biskra", 600),
    ("08", "Béchar", 900),
    ("09", "Blida", 350),
    ("10", "Bouira", 400),
    ("11", "Tamanrasset", 1000),
    ("12", "Tébessa", 600),
    ("13", "Tlemcen", 500),
    ("14", "Tiaret", 500),
    ("15", "Tizi Ouzou", 400),
    ("16", "Alger", 300),
    ("17", "Djelfa", 600),
    ("18", "Jijel", 450),
    ("19", "Sétif", 450),
    ("20", "Saïda", 550),
    ("21", "Skikda", 450),
    ("22", "Sidi Bel Abbès", 500),
    ("23", "Annaba", 450),
    ("24", "Guelma", 500),
    ("25", "Constantine", 450),
    ("26", "Médéa", 400),
    ("27", "Mostaganem", 450),
    ("28", "M'Sila", 500),
    ("29", "Mascara", 500),
    ("30", "Ouargla", 700),
    ("31", "Oran", 400),
    ("32", "El Bayadh", 650),
    ("33", "Illizi", 1000),
    ("34", "Bordj Bou Arréridj", 450),
    ("35", "Boumerdès", 350),
    ("36", "El Tarf", 500),
    ("37", "Tindouf", 1000),
    ("38", "Tissemsilt", 500),
    ("39", "El Oued", 650),
    ("40", "Khenchela", 550),
    ("41", "Souk Ahras", 550),
    ("42", "Tipaza", 350),
    ("43", "Mila", 500),
    ("44", "Aïn Defla", 450),
    ("45", "Naâma", 650),
    ("46", "Aïn Témouchent", 500),
    ("47", "Ghardaïa", 650),
    ("48", "Relizane", 500),
    ("49", "Timimoun", 950),
    ("50", "Bordj Badji Mokhtar", 1000),
    ("51", "Ouled Djellal", 650),
    ("52", "Béni Abbès", 950),
    ("53", "In Salah", 1000),
    ("54", "In Guezzam", 1000),
    ("55", "Touggourt", 700),
    ("56", "Djanet", 1000),
    ("57", "El M'Ghair", 700),
    ("58", "El Meniaa", 750),
];

/// Seeds the delivery zone table with the wilaya reference list.
///
/// Idempotent as a whole, not per row: any existing zone row suppresses
/// seeding entirely.
///
/// # Arguments
///
/// * `pool` - The database connection pool.
///
/// # Returns
///
/// A `Result<()>`.
pub async fn seed_delivery_zones(pool: &Pool) -> Result<()> {
    let client = pool.get().await?;

    let row = client
        .query_one("SELECT COUNT(*) AS count FROM delivery_zones", &[])
        .await?;
    let count: i64 = row.try_get("count")?;

    if count > 0 {
        tracing::debug!("Delivery zones already seeded ({} rows), skipping", count);
        return Ok(());
    }

    let stmt = client
        .prepare(
            r#"
            INSERT INTO delivery_zones (id, code, name, delivery_fee)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .await?;

    for (code, name, fee) in WILAYAS {
        client
            .execute(&stmt, &[&Uuid::new_v4(), code, name, fee])
            .await?;
    }

    tracing::info!("✅ Seeded {} delivery zones", WILAYAS.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn covers_all_58_wilayas() {
        assert_eq!(WILAYAS.len(), 58);
    }

    #[test]
    fn codes_are_unique_and_two_digits() {
        let mut seen = HashSet::new();
        for (code, _, _) in WILAYAS {
            assert_eq!(code.len(), 2, "code {} is not two digits", code);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert!(seen.insert(*code), "duplicate code {}", code);
        }
    }

    #[test]
    fn fees_are_positive() {
        for (code, _, fee) in WILAYAS {
            assert!(*fee > 0, "wilaya {} has non-positive fee", code);
        }
    }
}
