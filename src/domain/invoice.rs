use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Time between issuing an invoice and its due date.
pub const DUE_AFTER_HOURS: i64 = 1;
/// Seconds an invoice stays payable after its due date.
pub const EXPIRATION_SECS: u64 = 3 * 60 * 60;
/// Late payment fine, in percent.
pub const FINE_PERCENT: Decimal = dec!(5);
/// Monthly interest, in percent.
pub const INTEREST_PERCENT: Decimal = dec!(2.5);
pub const IMMEDIATE_TAG: &str = "immediate";

const FIRST_NAMES: &[&str] = &[
    "Ana", "Bruno", "Carla", "Daniel", "Eduarda", "Felipe", "Gabriela", "Heitor", "Isabela",
    "João", "Larissa", "Marcos", "Natália", "Otávio", "Paula", "Rafael", "Sofia", "Tiago",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Barbosa", "Cardoso", "Costa", "Ferreira", "Gomes", "Lima", "Martins", "Oliveira",
    "Pereira", "Ribeiro", "Rocha", "Santos", "Silva", "Souza",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceRequest {
    pub amount: i64,
    pub name: String,
    pub tax_id: String,
    pub due: DateTime<Utc>,
    pub expiration: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub fine: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub interest: Decimal,
    pub tags: Vec<String>,
}

/// An invoice as acknowledged by the payment API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceResult {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}

/// Produces synthetic invoices with random payees.
pub struct InvoiceGenerator<R: Rng> {
    rng: R,
}

impl<R: Rng> InvoiceGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generates `count` invoices due one hour after `now`.
    pub fn batch(&mut self, count: usize, now: DateTime<Utc>) -> Vec<InvoiceRequest> {
        (0..count).map(|_| self.invoice(now)).collect()
    }

    pub fn invoice(&mut self, now: DateTime<Utc>) -> InvoiceRequest {
        InvoiceRequest {
            amount: self.rng.gen_range(1..=100),
            name: self.name(),
            tax_id: random_cpf(&mut self.rng),
            due: now + Duration::hours(DUE_AFTER_HOURS),
            expiration: EXPIRATION_SECS,
            fine: FINE_PERCENT,
            interest: INTEREST_PERCENT,
            tags: vec![IMMEDIATE_TAG.to_string()],
        }
    }

    /// Draws a batch size from `range`.
    pub fn batch_size(&mut self, range: std::ops::RangeInclusive<usize>) -> usize {
        self.rng.gen_range(range)
    }

    fn name(&mut self) -> String {
        let first = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("Ana");
        let last = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("Silva");
        format!("{first} {last}")
    }
}

/// Generates a random CPF with valid check digits, formatted `ddd.ddd.ddd-dd`.
pub fn random_cpf<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut digits = [0u8; 11];
    loop {
        for digit in digits.iter_mut().take(9) {
            *digit = rng.gen_range(0..=9);
        }
        // Repeated-digit sequences pass the checksum but are never issued.
        if digits[..9].iter().any(|d| *d != digits[0]) {
            break;
        }
    }
    digits[9] = cpf_check_digit(&digits[..9]);
    digits[10] = cpf_check_digit(&digits[..10]);
    format_cpf(&digits)
}

/// Returns true when `tax_id` is an 11-digit CPF with matching check digits.
pub fn is_valid_cpf(tax_id: &str) -> bool {
    let digits: Vec<u8> = tax_id
        .chars()
        .filter(|c| !matches!(c, '.' | '-'))
        .map(|c| c.to_digit(10).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()
        .unwrap_or_default();

    if digits.len() != 11 || digits.iter().all(|d| *d == digits[0]) {
        return false;
    }
    digits[9] == cpf_check_digit(&digits[..9]) && digits[10] == cpf_check_digit(&digits[..10])
}

fn cpf_check_digit(digits: &[u8]) -> u8 {
    let weight_start = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| *d as u32 * (weight_start - i as u32))
        .sum();
    match (sum * 10) % 11 {
        10 => 0,
        r => r as u8,
    }
}

fn format_cpf(digits: &[u8; 11]) -> String {
    let s: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
    format!("{}.{}.{}-{}", &s[0..3], &s[3..6], &s[6..9], &s[9..11])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    #[test]
    fn test_known_cpf_is_valid() {
        assert!(is_valid_cpf("137.938.810-40"));
        assert!(is_valid_cpf("13793881040"));
        assert!(!is_valid_cpf("137.938.810-41"));
        assert!(!is_valid_cpf("111.111.111-11"));
        assert!(!is_valid_cpf("1379388104"));
    }

    #[test]
    fn test_generated_cpfs_are_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let cpf = random_cpf(&mut rng);
            assert_eq!(cpf.len(), 14, "{cpf}");
            assert!(is_valid_cpf(&cpf), "{cpf}");
        }
    }

    #[test]
    fn test_invoice_terms() {
        let mut generator = InvoiceGenerator::new(StdRng::seed_from_u64(1));
        let now = Utc::now();
        let invoice = generator.invoice(now);

        assert!((1..=100).contains(&invoice.amount));
        assert_eq!(invoice.due, now + Duration::hours(1));
        assert_eq!(invoice.expiration, 10_800);
        assert_eq!(invoice.fine, dec!(5));
        assert_eq!(invoice.interest, dec!(2.5));
        assert_eq!(invoice.tags, vec!["immediate".to_string()]);
        assert!(invoice.name.contains(' '));
    }

    #[test]
    fn test_batch_size_stays_in_range() {
        let mut generator = InvoiceGenerator::new(StdRng::seed_from_u64(3));
        for _ in 0..200 {
            let size = generator.batch_size(8..=12);
            assert!((8..=12).contains(&size));
        }
        assert_eq!(generator.batch(4, Utc::now()).len(), 4);
    }

    #[test]
    fn test_percentages_serialize_as_numbers() {
        let mut generator = InvoiceGenerator::new(StdRng::seed_from_u64(5));
        let encoded = serde_json::to_value(generator.invoice(Utc::now())).unwrap();

        assert_eq!(encoded["fine"], json!(5.0));
        assert_eq!(encoded["interest"], json!(2.5));
        assert!(encoded["taxId"].is_string());
    }
}
