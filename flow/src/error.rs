use signview_item::AdmissionError;
use signview_nav::FlatIndexError;
use signview_text::FormatError;
use thiserror::Error;

/// Why a review session could not be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error(transparent)]
    Admission(#[from] AdmissionError),

    #[error(transparent)]
    FlatIndex(#[from] FlatIndexError),

    #[error("failed to display token amount: {0}")]
    TokenAmount(#[source] FormatError),

    #[error("failed to display system fee: {0}")]
    SystemFee(#[source] FormatError),

    #[error("failed to display network fee: {0}")]
    NetworkFee(#[source] FormatError),

    #[error("failed to display total fees: {0}")]
    TotalFee(#[source] FormatError),

    #[error("system fee plus network fee overflows")]
    TotalFeeOverflow,

    #[error("arbitrary contract scripts are not allowed")]
    ScriptsNotAllowed,
}
