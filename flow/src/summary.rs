use std::fmt::Write;

use signview_item::TEXT_CAPACITY;
use signview_text::{BoundedText, FormatError, format_fixed_point, write_hex};
use signview_tx::{GAS_DECIMALS, Transaction, TransactionKind};

use crate::ReviewError;

/// Room for a symbol, a space and a formatted u64 amount.
pub const AMOUNT_CAPACITY: usize = 30;

/// Which host shows a summary page.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Shown {
    Always,
    StepOnly,
    IndexOnly,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPage {
    pub title: &'static str,
    pub text: BoundedText<TEXT_CAPACITY>,
    pub shown: Shown,
}

impl SummaryPage {
    fn new(title: &'static str, text: &str, shown: Shown) -> Self {
        Self {
            title,
            text: BoundedText::truncated_from(text),
            shown,
        }
    }
}

/// The static pages of a review, formatted once when the session starts.
#[derive(Debug, Clone)]
pub struct Summary {
    pages: Vec<SummaryPage>,
}

impl Summary {
    pub fn build(tx: &Transaction) -> Result<Self, ReviewError> {
        let mut pages = Vec::new();

        match &tx.kind {
            TransactionKind::Vote { to: Some(key) } => {
                pages.push(SummaryPage::new("Object", "Casting vote", Shown::IndexOnly));
                let mut page = SummaryPage::new("Casting vote for", "", Shown::Always);
                write_hex(key.as_bytes(), &mut page.text);
                pages.push(page);
            }
            TransactionKind::Vote { to: None } => {
                pages.push(SummaryPage::new(
                    "Object",
                    "Retracting vote",
                    Shown::IndexOnly,
                ));
                pages.push(SummaryPage::new("Retracting vote", "", Shown::StepOnly));
            }
            TransactionKind::Transfer {
                asset,
                destination,
                amount,
            } => {
                pages.push(SummaryPage::new(
                    "Object",
                    "System asset transfer",
                    Shown::IndexOnly,
                ));
                pages.push(SummaryPage::new(
                    "Destination addr",
                    destination,
                    Shown::Always,
                ));
                let amount = amount_text(asset.symbol(), *amount, asset.decimals())
                    .map_err(ReviewError::TokenAmount)?;
                pages.push(SummaryPage::new(
                    "Token amount",
                    amount.as_str(),
                    Shown::Always,
                ));
            }
            TransactionKind::Script => {}
        }

        let mut network = SummaryPage::new("Target network", "", Shown::Always);
        let _ = write!(network.text, "{}", tx.network());
        pages.push(network);

        let system_fee = gas_text(tx.system_fee).map_err(ReviewError::SystemFee)?;
        pages.push(SummaryPage::new(
            "System fee",
            system_fee.as_str(),
            Shown::Always,
        ));

        let network_fee = gas_text(tx.network_fee).map_err(ReviewError::NetworkFee)?;
        pages.push(SummaryPage::new(
            "Network fee",
            network_fee.as_str(),
            Shown::Always,
        ));

        let total = tx
            .system_fee
            .checked_add(tx.network_fee)
            .ok_or(ReviewError::TotalFeeOverflow)?;
        let total = gas_text(total).map_err(ReviewError::TotalFee)?;
        pages.push(SummaryPage::new(
            "Total fees",
            total.as_str(),
            Shown::Always,
        ));

        let mut valid_until = SummaryPage::new("Valid until height", "", Shown::Always);
        let _ = write!(valid_until.text, "{}", tx.valid_until_block);
        pages.push(valid_until);

        Ok(Self { pages })
    }

    pub fn all(&self) -> &[SummaryPage] {
        &self.pages
    }

    pub fn step_pages(&self) -> impl Iterator<Item = &SummaryPage> {
        self.pages
            .iter()
            .filter(|page| page.shown != Shown::IndexOnly)
    }

    pub fn index_pages(&self) -> impl Iterator<Item = &SummaryPage> {
        self.pages
            .iter()
            .filter(|page| page.shown != Shown::StepOnly)
    }
}

fn amount_text(
    symbol: &str,
    value: u64,
    decimals: u8,
) -> Result<BoundedText<AMOUNT_CAPACITY>, FormatError> {
    let mut out = BoundedText::new();
    out.push_str(symbol);
    out.push_char(' ');
    format_fixed_point(value, decimals, &mut out)?;
    Ok(out)
}

fn gas_text(value: u64) -> Result<BoundedText<AMOUNT_CAPACITY>, FormatError> {
    amount_text("GAS", value, GAS_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{transaction, transfer};
    use signview_tx::{Asset, PublicKey, TESTNET_MAGIC};

    fn titles<'a>(pages: impl Iterator<Item = &'a SummaryPage>) -> Vec<&'static str> {
        pages.map(|page| page.title).collect()
    }

    fn text_of<'a>(summary: &'a Summary, title: &str) -> &'a str {
        summary
            .all()
            .iter()
            .find(|page| page.title == title)
            .map(|page| page.text.as_str())
            .unwrap()
    }

    #[test]
    fn transfer_pages() {
        let tx = transfer(&[(0, 0)]);
        let summary = Summary::build(&tx).unwrap();

        assert_eq!(
            titles(summary.index_pages()),
            vec![
                "Object",
                "Destination addr",
                "Token amount",
                "Target network",
                "System fee",
                "Network fee",
                "Total fees",
                "Valid until height",
            ]
        );
        assert_eq!(summary.step_pages().count(), 7);
        assert_eq!(text_of(&summary, "Object"), "System asset transfer");
        assert_eq!(
            text_of(&summary, "Destination addr"),
            "NhsVB4etFffHjpLoj2ngVkkfvbtrhfzL4c"
        );
        assert_eq!(text_of(&summary, "Token amount"), "GAS 1.00000000");
        assert_eq!(text_of(&summary, "Target network"), "MainNet");
        assert_eq!(text_of(&summary, "System fee"), "GAS 1.23456789");
        assert_eq!(text_of(&summary, "Network fee"), "GAS 0.00000005");
        assert_eq!(text_of(&summary, "Total fees"), "GAS 1.23456794");
        assert_eq!(text_of(&summary, "Valid until height"), "4242");
    }

    #[test]
    fn neo_has_no_decimals() {
        let tx = transaction(
            TransactionKind::Transfer {
                asset: Asset::Neo,
                destination: "Nabc".to_owned(),
                amount: 5,
            },
            &[(0, 0)],
        );
        let summary = Summary::build(&tx).unwrap();
        assert_eq!(text_of(&summary, "Token amount"), "NEO 5");
    }

    #[test]
    fn casting_vote() {
        let key: PublicKey = format!("02{}", "ab".repeat(32)).parse().unwrap();
        let tx = transaction(TransactionKind::Vote { to: Some(key) }, &[(0, 0)]);
        let summary = Summary::build(&tx).unwrap();

        assert_eq!(
            titles(summary.step_pages())[..2],
            ["Casting vote for", "Target network"]
        );
        assert_eq!(
            titles(summary.index_pages())[..2],
            ["Object", "Casting vote for"]
        );
        assert_eq!(
            text_of(&summary, "Casting vote for"),
            format!("02{}", "AB".repeat(32))
        );
    }

    #[test]
    fn retracting_vote() {
        let tx = transaction(TransactionKind::Vote { to: None }, &[(0, 0)]);
        let summary = Summary::build(&tx).unwrap();

        let step: Vec<_> = summary.step_pages().collect();
        assert_eq!(step[0].title, "Retracting vote");
        assert!(step[0].text.is_empty());

        let index: Vec<_> = summary.index_pages().collect();
        assert_eq!(index[0].title, "Object");
        assert_eq!(index[0].text, "Retracting vote");
        assert_eq!(index[1].title, "Target network");
    }

    #[test]
    fn script_has_no_object() {
        let mut tx = transaction(TransactionKind::Script, &[(0, 0)]);
        tx.network_magic = TESTNET_MAGIC;
        let summary = Summary::build(&tx).unwrap();
        assert_eq!(titles(summary.index_pages()), titles(summary.step_pages()));
        assert_eq!(text_of(&summary, "Target network"), "TestNet");
    }

    #[test]
    fn private_network_is_decimal() {
        let mut tx = transaction(TransactionKind::Script, &[(0, 0)]);
        tx.network_magic = 1234;
        let summary = Summary::build(&tx).unwrap();
        assert_eq!(text_of(&summary, "Target network"), "1234");
    }

    #[test]
    fn total_fee_overflow() {
        let mut tx = transaction(TransactionKind::Script, &[(0, 0)]);
        tx.system_fee = u64::MAX;
        tx.network_fee = 1;
        assert_eq!(
            Summary::build(&tx).unwrap_err(),
            ReviewError::TotalFeeOverflow
        );
    }

    #[test]
    fn largest_fee_fits() {
        let mut tx = transaction(TransactionKind::Script, &[(0, 0)]);
        tx.system_fee = u64::MAX;
        tx.network_fee = 0;
        let summary = Summary::build(&tx).unwrap();
        assert_eq!(text_of(&summary, "Total fees"), "GAS 184467440737.09551615");
    }

    #[test]
    fn amount_capacity_is_reported() {
        let err = amount_text("A_VERY_LONG_TOKEN_SYMBOL_XYZ", 100, 8).unwrap_err();
        assert_eq!(
            err,
            FormatError::Capacity {
                needed: 10,
                remaining: 1
            }
        );
    }
}
