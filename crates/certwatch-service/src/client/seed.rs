//! Sample client data.

use chrono::NaiveDate;
use tracing::info;

use certwatch_core::error::AppError;
use certwatch_database::repositories::{ClientRepository, SystemLogRepository};
use certwatch_entity::client::{ClientInput, ClientStatus, DATE_FORMAT};
use certwatch_entity::system_log::SystemAction;

/// (name, business type, address, location, expiry, last audit, body, contact, channel, status)
type SampleRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    ClientStatus,
);

const SAMPLES: &[SampleRow] = &[
    ("PT. Maju Jaya", "Manufacturing", "Jl. Merdeka No. 10, Jakarta", "Jakarta", "2025-02-15", "2024-02-10", "TUV Rheinland", "Budi Santoso", "081234567890 / budi@majujaya.co.id", ClientStatus::Active),
    ("CV. Sinar Abadi", "Construction", "Jl. Ahmad Yani No. 5, Bandung", "Bandung", "2025-05-20", "2024-05-18", "SGS", "Andi Wijaya", "081298765432 / andi@sinarabadi.co.id", ClientStatus::Active),
    ("PT. Mitra Sejahtera", "Logistics", "Jl. Sudirman No. 20, Surabaya", "Surabaya", "2024-12-01", "2023-12-01", "Bureau Veritas", "Siti Rahma", "081377788899 / siti@mitrasejahtera.co.id", ClientStatus::Expired),
    ("UD. Bintang Timur", "Food Processing", "Jl. Gajah Mada No. 12, Semarang", "Semarang", "2025-07-30", "2024-07-25", "Sucofindo", "Joko Prasetyo", "081355566677 / joko@bintangtimur.co.id", ClientStatus::Active),
    ("PT. Global Prima", "Textile", "Jl. Diponegoro No. 7, Medan", "Medan", "2025-03-12", "2024-03-10", "SGS", "Rina Kurnia", "081399988877 / rina@globalprima.co.id", ClientStatus::Active),
    ("CV. Karya Mandiri", "Trading", "Jl. Pahlawan No. 15, Yogyakarta", "Yogyakarta", "2025-09-05", "2024-09-01", "TUV Rheinland", "Agus Salim", "081344455566 / agus@karyamandiri.co.id", ClientStatus::Active),
    ("PT. Nusantara Jaya", "Agriculture", "Jl. Raya No. 8, Malang", "Malang", "2025-01-18", "2024-01-15", "Bureau Veritas", "Dewi Lestari", "081388899900 / dewi@nusantarajaya.co.id", ClientStatus::Active),
    ("UD. Maju Bersama", "Retail", "Jl. Veteran No. 3, Solo", "Solo", "2025-11-22", "2024-11-20", "Sucofindo", "Hendra Kusuma", "081366677788 / hendra@majubersama.co.id", ClientStatus::Active),
    ("PT. Samudera Luas", "Shipping", "Jl. Pelabuhan No. 20, Makassar", "Makassar", "2025-04-08", "2024-04-05", "SGS", "Bambang Wijaya", "081322233344 / bambang@samuderaluas.co.id", ClientStatus::Active),
    ("CV. Berkah Jaya", "Services", "Jl. Kemerdekaan No. 11, Palembang", "Palembang", "2025-06-14", "2024-06-10", "TUV Rheinland", "Sri Mulyani", "081355544433 / sri@berkahjaya.co.id", ClientStatus::Active),
];

/// The built-in sample clients.
pub fn sample_clients() -> Result<Vec<ClientInput>, AppError> {
    SAMPLES
        .iter()
        .map(
            |&(name, business_type, address, location, expiry, audit, body, contact, channel, status)| {
                Ok(ClientInput {
                    name: name.to_string(),
                    business_type: business_type.to_string(),
                    address: address.to_string(),
                    location: location.to_string(),
                    expiry_date: parse_sample_date(expiry)?,
                    last_audit_date: parse_sample_date(audit)?,
                    certification_body: body.to_string(),
                    contact_person: contact.to_string(),
                    contact_channel: channel.to_string(),
                    status,
                })
            },
        )
        .collect()
}

fn parse_sample_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| AppError::internal(format!("Bad sample date '{raw}': {e}")))
}

/// Insert the sample clients when the client table is empty.
///
/// Returns the number of clients inserted.
pub async fn seed_if_empty(
    clients: &ClientRepository,
    system_log: &SystemLogRepository,
) -> Result<usize, AppError> {
    if clients.count_all().await? > 0 {
        info!("Database already contains clients, skipping seed");
        return Ok(0);
    }

    let samples = sample_clients()?;
    for input in &samples {
        clients.create(input).await?;
    }

    system_log
        .record(
            SystemAction::DatabaseSeeded,
            format!("Successfully seeded {} clients", samples.len()),
        )
        .await?;
    info!(count = samples.len(), "Seeded sample clients");
    Ok(samples.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_samples_parse() {
        let samples = sample_clients().unwrap();
        assert_eq!(samples.len(), 10);
        assert_eq!(samples[0].name, "PT. Maju Jaya");
        assert_eq!(
            samples.iter().filter(|s| s.status == ClientStatus::Expired).count(),
            1
        );
    }
}
