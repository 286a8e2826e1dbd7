//! Form state for the prediction input screen.
//!
//! All field state lives here rather than in the UI layer, so completeness
//! and range checks can be exercised without a terminal.

use anyhow::{bail, Context};

use crate::domain::prediction::{AccountType, PredictionRequest};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Int,
    Float,
}

#[derive(Debug, Clone)]
pub struct NumericField {
    /// Wire name, also used to look fields up when building the request.
    pub name: &'static str,
    pub label: &'static str,
    pub hint: &'static str,
    pub kind: FieldKind,
    pub min: f64,
    pub max: f64,
    pub value: String,
}

impl NumericField {
    fn new(
        name: &'static str,
        label: &'static str,
        hint: &'static str,
        kind: FieldKind,
        min: f64,
        max: f64,
    ) -> Self {
        Self {
            name,
            label,
            hint,
            kind,
            min,
            max,
            value: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Range highlight only: a value that does not parse is not flagged here,
    /// matching the keystroke check, and range violations never block submit.
    pub fn out_of_range(&self) -> bool {
        match self.value.trim().parse::<f64>() {
            Ok(v) => v < self.min || v > self.max,
            Err(_) => false,
        }
    }

    pub fn push_char(&mut self, c: char) {
        let accepted = c.is_ascii_digit()
            || (c == '.' && self.kind == FieldKind::Float && !self.value.contains('.'));
        if accepted {
            self.value.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        self.value.pop();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    fn parse_int(&self) -> anyhow::Result<i64> {
        match self.value.trim().parse::<i64>() {
            Ok(v) => Ok(v),
            Err(_) => bail!("{}: not a valid number", self.label),
        }
    }

    fn parse_float(&self) -> anyhow::Result<f64> {
        match self.value.trim().parse::<f64>() {
            Ok(v) => Ok(v),
            Err(_) => bail!("{}: not a valid number", self.label),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ToggleField {
    pub name: &'static str,
    pub label: &'static str,
    pub on: bool,
}

impl ToggleField {
    fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            on: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChurnForm {
    pub account_type: Option<AccountType>,
    pub toggles: Vec<ToggleField>,
    pub numbers: Vec<NumericField>,
}

impl Default for ChurnForm {
    fn default() -> Self {
        Self {
            account_type: None,
            toggles: vec![
                ToggleField::new("user_settings_crypto_unlocked", "Crypto Unlocked"),
                ToggleField::new("is_apple", "Apple Device"),
                ToggleField::new("is_gb", "United Kingdom"),
                ToggleField::new("is_pl", "Poland"),
                ToggleField::new("is_fr", "France"),
            ],
            numbers: vec![
                NumericField::new("age", "Age", "years (18-100)", FieldKind::Int, 18.0, 100.0),
                NumericField::new(
                    "total_transactions",
                    "Total Transactions",
                    "count (0-10000)",
                    FieldKind::Int,
                    0.0,
                    10_000.0,
                ),
                NumericField::new(
                    "avg_transaction_amount",
                    "Avg Transaction Amount",
                    "per transaction (0-100000)",
                    FieldKind::Float,
                    0.0,
                    100_000.0,
                ),
                NumericField::new(
                    "first_month_transactions",
                    "First Month Transactions",
                    "count (0-1000)",
                    FieldKind::Int,
                    0.0,
                    1_000.0,
                ),
                NumericField::new(
                    "first_month_active_days",
                    "First Month Active Days",
                    "days (0-31)",
                    FieldKind::Int,
                    0.0,
                    31.0,
                ),
                NumericField::new(
                    "days_to_first_transaction",
                    "Days To First Transaction",
                    "days (0-365)",
                    FieldKind::Int,
                    0.0,
                    365.0,
                ),
                NumericField::new(
                    "notification_success_rate",
                    "Notification Success Rate",
                    "ratio (0.0-1.0)",
                    FieldKind::Float,
                    0.0,
                    1.0,
                ),
                NumericField::new(
                    "total_notifications",
                    "Total Notifications",
                    "count (0-10000)",
                    FieldKind::Int,
                    0.0,
                    10_000.0,
                ),
            ],
        }
    }
}

impl ChurnForm {
    /// Single-select: choosing an account type replaces any previous choice.
    pub fn select_account(&mut self, account: AccountType) {
        self.account_type = Some(account);
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(t) = self.toggles.get_mut(index) {
            t.on = !t.on;
        }
    }

    /// Gates the submit control: every numeric field filled in and an
    /// account type chosen. Range violations do not factor in.
    pub fn is_complete(&self) -> bool {
        self.account_type.is_some() && self.numbers.iter().all(|f| !f.is_empty())
    }

    pub fn to_request(&self) -> anyhow::Result<PredictionRequest> {
        let Some(account) = self.account_type else {
            bail!("account type is required");
        };
        let (is_standard, is_premium, is_metal) = account.flags();

        Ok(PredictionRequest {
            is_standard,
            is_premium,
            is_metal,
            user_settings_crypto_unlocked: self.toggle_flag("user_settings_crypto_unlocked"),
            is_apple: self.toggle_flag("is_apple"),
            is_gb: self.toggle_flag("is_gb"),
            is_pl: self.toggle_flag("is_pl"),
            is_fr: self.toggle_flag("is_fr"),
            age: self.int("age")?,
            total_transactions: self.int("total_transactions")?,
            avg_transaction_amount: self.float("avg_transaction_amount")?,
            first_month_transactions: self.int("first_month_transactions")?,
            first_month_active_days: self.int("first_month_active_days")?,
            days_to_first_transaction: self.int("days_to_first_transaction")?,
            notification_success_rate: self.float("notification_success_rate")?,
            total_notifications: self.int("total_notifications")?,
        })
    }

    fn number(&self, name: &str) -> anyhow::Result<&NumericField> {
        self.numbers
            .iter()
            .find(|f| f.name == name)
            .with_context(|| format!("unknown field: {name}"))
    }

    fn int(&self, name: &str) -> anyhow::Result<i64> {
        self.number(name)?.parse_int()
    }

    fn float(&self, name: &str) -> anyhow::Result<f64> {
        self.number(name)?.parse_float()
    }

    fn toggle_flag(&self, name: &str) -> u8 {
        self.toggles
            .iter()
            .find(|t| t.name == name)
            .map(|t| u8::from(t.on))
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> ChurnForm {
        let mut form = ChurnForm::default();
        form.select_account(AccountType::Premium);
        let values = [
            ("age", "34"),
            ("total_transactions", "120"),
            ("avg_transaction_amount", "42.5"),
            ("first_month_transactions", "9"),
            ("first_month_active_days", "14"),
            ("days_to_first_transaction", "3"),
            ("notification_success_rate", "0.85"),
            ("total_notifications", "200"),
        ];
        for (name, value) in values {
            let field = form.numbers.iter_mut().find(|f| f.name == name).unwrap();
            field.value = value.to_string();
        }
        form
    }

    #[test]
    fn incomplete_until_every_required_field_is_filled() {
        let mut form = ChurnForm::default();
        assert!(!form.is_complete());

        form = filled_form();
        assert!(form.is_complete());

        let age = form.numbers.iter_mut().find(|f| f.name == "age").unwrap();
        age.clear();
        assert!(!form.is_complete());

        let age = form.numbers.iter_mut().find(|f| f.name == "age").unwrap();
        age.value = "34".to_string();
        form.account_type = None;
        assert!(!form.is_complete());
    }

    #[test]
    fn to_request_normalizes_booleans_and_parses_numbers() {
        let mut form = filled_form();
        form.toggle(0); // crypto unlocked
        form.toggle(2); // is_gb

        let req = form.to_request().unwrap();
        assert_eq!(
            (req.is_standard, req.is_premium, req.is_metal),
            (0, 1, 0)
        );
        assert_eq!(req.user_settings_crypto_unlocked, 1);
        assert_eq!(req.is_apple, 0);
        assert_eq!(req.is_gb, 1);
        assert_eq!(req.age, 34);
        assert_eq!(req.avg_transaction_amount, 42.5);
        assert_eq!(req.notification_success_rate, 0.85);
    }

    #[test]
    fn reselecting_account_type_keeps_single_flag() {
        let mut form = filled_form();
        form.select_account(AccountType::Standard);
        form.select_account(AccountType::Metal);
        form.select_account(AccountType::Premium);

        let req = form.to_request().unwrap();
        assert_eq!(
            u32::from(req.is_standard) + u32::from(req.is_premium) + u32::from(req.is_metal),
            1
        );
        assert_eq!(req.is_premium, 1);
    }

    #[test]
    fn out_of_range_flags_without_blocking_submission() {
        let mut form = filled_form();
        let age = form.numbers.iter_mut().find(|f| f.name == "age").unwrap();
        age.value = "300".to_string();
        assert!(age.out_of_range());
        assert!(form.is_complete());
        assert_eq!(form.to_request().unwrap().age, 300);
    }

    #[test]
    fn keystroke_filter_respects_field_kind() {
        let mut form = ChurnForm::default();
        let age = form.numbers.iter_mut().find(|f| f.name == "age").unwrap();
        age.push_char('3');
        age.push_char('.');
        age.push_char('4');
        assert_eq!(age.value, "34");

        let rate = form
            .numbers
            .iter_mut()
            .find(|f| f.name == "notification_success_rate")
            .unwrap();
        rate.push_char('0');
        rate.push_char('.');
        rate.push_char('8');
        rate.push_char('.');
        assert_eq!(rate.value, "0.8");
    }

    #[test]
    fn empty_field_is_not_marked_out_of_range() {
        let form = ChurnForm::default();
        assert!(form.numbers.iter().all(|f| !f.out_of_range()));
    }
}
