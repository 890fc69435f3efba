use uuid::Uuid;

use crate::application::invoice_view::{InvoicePage, InvoiceView, StatusFilter, ViewError};
use crate::application::order_state::OperationKind;
use crate::application::order_store::OrderStore;
use crate::domain::errors::StoreError;
use crate::domain::order::{Order, QuoteDocument};
use crate::domain::ports::OrderGateway;

/// Blocking, user-acknowledged alert. Delete and download failures go here in
/// addition to the store's error field.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        log::error!("{}", message);
    }
}

/// Drives the invoice list and detail view against an [`OrderStore`].
pub struct InvoiceScreen<G, N = LogNotifier> {
    store: OrderStore<G>,
    view: InvoiceView,
    notifier: N,
    token: String,
}

impl<G: OrderGateway, N: Notifier> InvoiceScreen<G, N> {
    pub fn new(store: OrderStore<G>, notifier: N, token: impl Into<String>) -> Self {
        Self {
            store,
            view: InvoiceView::default(),
            notifier,
            token: token.into(),
        }
    }

    pub fn store(&self) -> &OrderStore<G> {
        &self.store
    }

    pub fn view(&self) -> &InvoiceView {
        &self.view
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub async fn refresh(&mut self) -> Result<usize, StoreError> {
        let orders = self.store.fetch_orders(&self.token).await?;
        self.view.clamp_page(&orders);
        Ok(orders.len())
    }

    /// Projects the current store contents through the view.
    pub fn with_page<T>(&self, f: impl FnOnce(&InvoicePage<'_>) -> T) -> T {
        self.store.read(|state| f(&self.view.project(state.orders())))
    }

    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.view.set_filter(filter);
    }

    pub fn set_page_size(&mut self, page_size: usize) -> Result<(), ViewError> {
        self.view.set_page_size(page_size)
    }

    pub fn go_to_page(&mut self, page: usize) -> Result<(), ViewError> {
        let view = &mut self.view;
        self.store.read(|state| view.go_to_page(page, state.orders()))
    }

    pub async fn open_invoice(&mut self, id: Uuid) -> Result<Order, StoreError> {
        self.view.select(id);
        let order = self.store.fetch_order(id, &self.token).await?;
        if self.view.selected() == Some(id) {
            self.view.reset_carousel();
        }
        Ok(order)
    }

    pub fn close_invoice(&mut self) {
        self.view.close();
    }

    pub fn carousel_next(&mut self) -> bool {
        let lines = self.selected_line_count();
        self.view.carousel_next(lines)
    }

    pub fn carousel_previous(&mut self) -> bool {
        self.view.carousel_previous()
    }

    /// Arms the delete confirmation for the selected order. Refused while any
    /// delete dispatched through the shared store is still unsettled.
    pub fn request_delete(&mut self) -> bool {
        let Some(id) = self.view.selected() else {
            return false;
        };
        let view = &mut self.view;
        self.store.read(|state| {
            let deleting = state.is_in_flight(OperationKind::DeleteOrder);
            let order = state
                .current_order()
                .filter(|o| o.id == id)
                .or_else(|| state.find_order(id));
            match order {
                Some(order) => view.request_delete(order, deleting),
                None => false,
            }
        })
    }

    pub fn cancel_delete(&mut self) {
        self.view.cancel_delete();
    }

    /// Deletes the selected order if the confirmation gate is armed. Returns
    /// `Ok(None)` when there was nothing to confirm.
    pub async fn confirm_delete(&mut self) -> Result<Option<Uuid>, StoreError> {
        let Some(id) = self.view.confirm_delete() else {
            return Ok(None);
        };
        match self.store.delete_order(id, &self.token).await {
            Ok(deleted) => {
                log::info!("Deleted order {}", deleted);
                self.view.close();
                let view = &mut self.view;
                self.store.read(|state| view.clamp_page(state.orders()));
                Ok(Some(deleted))
            }
            Err(e) => {
                self.notifier
                    .alert(&format!("Could not delete order {}: {}", id, e));
                Err(e)
            }
        }
    }

    pub async fn download_quote(&self, id: Uuid) -> Result<QuoteDocument, StoreError> {
        self.store
            .download_quote(id, &self.token)
            .await
            .inspect_err(|e| {
                self.notifier
                    .alert(&format!("Could not download quote for order {}: {}", id, e))
            })
    }

    fn selected_line_count(&self) -> usize {
        let Some(id) = self.view.selected() else {
            return 0;
        };
        self.store.read(|state| {
            state
                .current_order()
                .filter(|o| o.id == id)
                .map_or(0, |o| o.lines.len())
        })
    }
}
