use std::fmt::Write;

use signview_text::{BoundedText, write_hex};
use signview_tx::{Transaction, WitnessScope};

use crate::ItemKind;

pub const TITLE_CAPACITY: usize = 64;
/// Fits a 33-byte public key as hex.
pub const TEXT_CAPACITY: usize = 66;

/// One screen worth of title and text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page<const T: usize = TITLE_CAPACITY, const X: usize = TEXT_CAPACITY> {
    pub title: BoundedText<T>,
    pub text: BoundedText<X>,
}

impl<const T: usize, const X: usize> Page<T, X> {
    pub const fn new() -> Self {
        Self {
            title: BoundedText::new(),
            text: BoundedText::new(),
        }
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.text.clear();
    }
}

pub fn render(item: ItemKind, tx: &Transaction) -> Page {
    let mut page = Page::new();
    render_into(item, tx, &mut page);
    page
}

/// Overwrite `page` with the title and text of `item`.
///
/// Output that does not fit is truncated. An item that does not belong to
/// `tx` leaves the text empty.
pub fn render_into<const T: usize, const X: usize>(
    item: ItemKind,
    tx: &Transaction,
    page: &mut Page<T, X>,
) {
    page.clear();

    let Some(signer) = tx.signers.get(item.signer_index()) else {
        debug_assert!(false, "item {item:?} has no signer");
        return;
    };

    // BoundedText never fails to write, it only truncates.
    match item {
        ItemKind::SignerIndex { signer: index } => {
            page.title.push_str("Signer");
            let _ = write!(page.text, "{} of {}", index + 1, tx.signers.len());
        }
        ItemKind::SignerAccount { .. } => {
            page.title.push_str("Account");
            write_hex(signer.account.as_bytes(), &mut page.text);
        }
        ItemKind::SignerScope { .. } => {
            page.title.push_str("Scope");
            scope_label(signer.scope, &mut page.text);
        }
        ItemKind::SignerContract { contract, .. } => {
            let count = signer.allowed_contracts.len();
            let _ = write!(page.title, "Contract {} of {}", contract + 1, count);
            match signer.allowed_contracts.get(contract) {
                Some(hash) => {
                    write_hex(hash.as_bytes(), &mut page.text);
                }
                None => debug_assert!(false, "contract {contract} out of range"),
            }
        }
        ItemKind::SignerGroup { group, .. } => {
            let count = signer.allowed_groups.len();
            let _ = write!(page.title, "Group {} of {}", group + 1, count);
            match signer.allowed_groups.get(group) {
                Some(key) => {
                    write_hex(key.as_bytes(), &mut page.text);
                }
                None => debug_assert!(false, "group {group} out of range"),
            }
        }
    }
}

/// Append the human label of a witness scope.
pub fn scope_label<const N: usize>(scope: WitnessScope, out: &mut BoundedText<N>) {
    if scope.is_none() {
        out.push_str("None");
        return;
    }
    if scope.is_global() {
        out.push_str("Global");
        return;
    }

    let flags = [
        (WitnessScope::BY_ENTRY, "By Entry"),
        (WitnessScope::CONTRACTS, "Contracts"),
        (WitnessScope::GROUPS, "Groups"),
    ];
    let mut first = true;
    for (flag, label) in flags {
        if !scope.contains(flag) {
            continue;
        }
        if !first {
            out.push_char(',');
        }
        out.push_str(label);
        first = false;
    }
}
