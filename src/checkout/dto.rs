use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::model::CheckoutEntity;
use crate::core::library::CheckoutStatus;
use crate::utils::date::{opt_serializer, serializer};


// CheckoutDto abstracts the book that is checked out or borrowed.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct CheckoutDto {
    pub checkout_id: String,
    pub book_id: String,
    pub borrower_id: String,
    pub borrower_name: String,
    pub checkout_status: CheckoutStatus,
    #[serde(with = "serializer")]
    pub checkout_date: NaiveDate,
    #[serde(with = "serializer")]
    pub due_date: NaiveDate,
    #[serde(with = "opt_serializer", default)]
    pub return_date: Option<NaiveDate>,
    pub fine: f64,
}

impl From<&CheckoutEntity> for CheckoutDto {
    fn from(other: &CheckoutEntity) -> CheckoutDto {
        CheckoutDto {
            checkout_id: other.checkout_id.to_string(),
            book_id: other.book_id.to_string(),
            borrower_id: other.borrower_id.to_string(),
            borrower_name: other.borrower_name.to_string(),
            checkout_status: other.checkout_status,
            checkout_date: other.checkout_date,
            due_date: other.due_date,
            return_date: other.return_date,
            fine: other.fine,
        }
    }
}

// ReturnReceiptDto is the outcome of a return: the closed loan and what it cost.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ReturnReceiptDto {
    pub checkout: CheckoutDto,
    pub days_overdue: i64,
    pub fine_charged: f64,
}


#[cfg(test)]
mod tests {
    use crate::checkout::domain::model::CheckoutEntity;
    use crate::checkout::dto::CheckoutDto;
    use crate::core::library::CheckoutStatus;
    use crate::utils::date::parse_date;

    #[tokio::test]
    async fn test_should_build_checkout_dto() {
        let entity = CheckoutEntity::new("T001", "B001", "S001", "Alice Johnson",
                                         parse_date("2024-01-15").expect("should parse"),
                                         parse_date("2024-01-29").expect("should parse"));
        let checkout = CheckoutDto::from(&entity);
        assert_eq!("B001", checkout.book_id.as_str());
        assert_eq!("S001", checkout.borrower_id.as_str());
        assert_eq!(CheckoutStatus::Active, checkout.checkout_status);
        let json = serde_json::to_string(&checkout).expect("should serialize");
        assert!(json.contains(r#""due_date":"2024-01-29""#));
        assert!(json.contains(r#""return_date":null"#));
    }
}
