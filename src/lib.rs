pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infrastructure;

#[cfg(test)]
mod mock_gateway;

pub use application::invoice_screen::{InvoiceScreen, LogNotifier, Notifier};
pub use application::invoice_view::{InvoicePage, InvoiceView, StatusFilter};
pub use application::order_state::{OperationKind, OrderState};
pub use application::order_store::OrderStore;
pub use config::Config;
pub use errors::AppError;
pub use infrastructure::http_order_gateway::HttpOrderGateway;

/// Build an invoice screen talking to the order service named in `config`.
pub fn build_screen(config: &Config) -> Result<InvoiceScreen<HttpOrderGateway>, AppError> {
    let gateway = HttpOrderGateway::new(config.service_url.as_str(), config.timeout)?;
    Ok(InvoiceScreen::new(
        OrderStore::new(gateway),
        LogNotifier,
        config.token.as_str(),
    ))
}
