//! Raw form input and the checks that run before anything is sent.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::models::{
    CategoryInput, Credentials, NewTransaction, Registration, Transaction, TransactionKind,
};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Preset colours offered when creating a category.
pub const CATEGORY_COLORS: [&str; 10] = [
    "#0EA5E9", "#8B5CF6", "#F59E0B", "#EF4444", "#10B981", "#6366F1", "#F97316", "#EC4899",
    "#14B8A6", "#84CC16",
];

#[derive(Clone, Debug, PartialEq)]
pub struct TransactionForm {
    pub date: String,
    pub title: String,
    pub kind: TransactionKind,
    pub amount: String,
    pub category: String,
    pub notes: String,
}

impl TransactionForm {
    pub fn blank(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            title: String::new(),
            kind: TransactionKind::Expense,
            amount: String::new(),
            category: String::new(),
            notes: String::new(),
        }
    }

    pub fn validate(&self) -> Result<NewTransaction, ValidationError> {
        let title = required(&self.title, "Title")?;
        let category = required(&self.category, "Category")?;
        let date_raw = required(&self.date, "Date")?;
        let date =
            NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)?;
        let amount = parse_amount(&self.amount)?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }
        let notes = self.notes.trim();

        Ok(NewTransaction {
            date,
            title,
            kind: self.kind,
            amount,
            category,
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        })
    }
}

impl From<&Transaction> for TransactionForm {
    fn from(tx: &Transaction) -> Self {
        Self {
            date: tx.date.format("%Y-%m-%d").to_string(),
            title: tx.title.clone(),
            kind: tx.kind,
            amount: tx.amount.to_string(),
            category: tx.category.clone(),
            notes: tx.notes.clone().unwrap_or_default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CategoryForm {
    pub name: String,
    pub budget_limit: String,
    pub color: String,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            budget_limit: String::new(),
            color: CATEGORY_COLORS[0].to_string(),
        }
    }
}

impl CategoryForm {
    pub fn validate(&self) -> Result<CategoryInput, ValidationError> {
        let name = required(&self.name, "Category name")?;
        required(&self.budget_limit, "Budget limit")?;
        let budget_limit = parse_amount(&self.budget_limit)?;
        if budget_limit < Decimal::ZERO {
            return Err(ValidationError::NegativeLimit);
        }
        Ok(CategoryInput {
            name,
            budget_limit,
            color: self.color.clone(),
            period: None,
        })
    }
}

pub fn validate_login(email: &str, password: &str) -> Result<Credentials, ValidationError> {
    let email = required(email, "Email")?;
    if password.is_empty() {
        return Err(ValidationError::Missing("Password"));
    }
    Ok(Credentials {
        email,
        password: password.to_string(),
    })
}

pub fn validate_registration(
    full_name: &str,
    email: &str,
    password: &str,
    confirm: &str,
) -> Result<Registration, ValidationError> {
    let full_name = required(full_name, "Full name")?;
    let credentials = validate_login(email, password)?;
    validate_new_password(password, confirm)?;
    Ok(Registration {
        full_name,
        email: credentials.email,
        password: credentials.password,
    })
}

pub fn validate_new_password(password: &str, confirm: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Old and new password from the settings form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
}

/// `Ok(None)` when no new password was entered.
pub fn validate_password_change(
    current: &str,
    new: &str,
    confirm: &str,
) -> Result<Option<PasswordChange>, ValidationError> {
    if new.is_empty() {
        return Ok(None);
    }
    if current.is_empty() {
        return Err(ValidationError::Missing("Current password"));
    }
    validate_new_password(new, confirm)?;
    Ok(Some(PasswordChange {
        current: current.to_string(),
        new: new.to_string(),
    }))
}

fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::Missing(field))
    } else {
        Ok(trimmed.to_string())
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Missing("Amount"));
    }
    Decimal::from_str(raw).map_err(|_| ValidationError::InvalidAmount)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> TransactionForm {
        TransactionForm {
            date: "2024-05-10".to_string(),
            title: "  Coffee ".to_string(),
            kind: TransactionKind::Expense,
            amount: "25.50".to_string(),
            category: "Food & Dining".to_string(),
            notes: "   ".to_string(),
        }
    }

    #[test]
    fn filled_form_becomes_new_transaction() {
        let tx = filled().validate().unwrap();
        assert_eq!(tx.title, "Coffee");
        assert_eq!(tx.amount, Decimal::new(2550, 2));
        assert_eq!(tx.notes, None);
    }

    #[test]
    fn zero_and_negative_amounts_are_rejected() {
        for amount in ["0", "0.00", "-4"] {
            let form = TransactionForm {
                amount: amount.to_string(),
                ..filled()
            };
            assert_eq!(form.validate(), Err(ValidationError::NonPositiveAmount));
        }
    }

    #[test]
    fn required_fields_are_checked_first() {
        let form = TransactionForm {
            title: " ".to_string(),
            amount: "0".to_string(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ValidationError::Missing("Title")));

        let form = TransactionForm {
            category: String::new(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ValidationError::Missing("Category")));
    }

    #[test]
    fn garbage_amount_and_date() {
        let form = TransactionForm {
            amount: "twelve".to_string(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ValidationError::InvalidAmount));

        let form = TransactionForm {
            date: "10/05/2024".to_string(),
            ..filled()
        };
        assert_eq!(form.validate(), Err(ValidationError::InvalidDate));
    }

    #[test]
    fn edit_form_round_trips_existing_transaction() {
        let tx = Transaction {
            id: 4,
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            title: "Salary".to_string(),
            kind: TransactionKind::Income,
            amount: Decimal::new(3000, 0),
            category: "Salary".to_string(),
            notes: Some("January".to_string()),
            created_at: None,
        };
        let draft = TransactionForm::from(&tx).validate().unwrap();
        assert_eq!(draft.amount, tx.amount);
        assert_eq!(draft.notes.as_deref(), Some("January"));
    }

    #[test]
    fn category_form_rules() {
        let form = CategoryForm {
            name: "Travel".to_string(),
            budget_limit: "500".to_string(),
            ..Default::default()
        };
        let input = form.validate().unwrap();
        assert_eq!(input.color, "#0EA5E9");
        assert_eq!(input.budget_limit, Decimal::new(500, 0));

        let zero = CategoryForm {
            budget_limit: "0".to_string(),
            ..form.clone()
        };
        assert!(zero.validate().is_ok());

        let negative = CategoryForm {
            budget_limit: "-1".to_string(),
            ..form
        };
        assert_eq!(negative.validate(), Err(ValidationError::NegativeLimit));
    }

    #[test]
    fn registration_checks_password() {
        assert_eq!(
            validate_registration("Ada", "ada@example.com", "short", "short"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(
            validate_registration("Ada", "ada@example.com", "longenough", "different"),
            Err(ValidationError::PasswordMismatch)
        );
        let reg = validate_registration("Ada", " ada@example.com ", "longenough", "longenough").unwrap();
        assert_eq!(reg.email, "ada@example.com");
    }

    #[test]
    fn password_change_is_optional_but_checked() {
        assert_eq!(validate_password_change("", "", ""), Ok(None));

        let err = validate_password_change("", "longenough", "longenough").unwrap_err();
        assert_eq!(err, ValidationError::Missing("Current password"));
        assert_eq!(err.to_string(), "Current password is required.");

        assert_eq!(
            validate_password_change("old-secret", "short", "short"),
            Err(ValidationError::PasswordTooShort)
        );
        assert_eq!(
            validate_password_change("old-secret", "longenough", "longenougH"),
            Err(ValidationError::PasswordMismatch)
        );
        assert_eq!(
            validate_password_change("old-secret", "longenough", "longenough"),
            Ok(Some(PasswordChange {
                current: "old-secret".to_string(),
                new: "longenough".to_string(),
            }))
        );
    }
}
