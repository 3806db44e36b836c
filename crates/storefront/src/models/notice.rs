//! User-facing dialog messages.
//!
//! Every outcome the shopper is told about (item added, purchase done,
//! validation warnings, search results) is a [`Notice`]. The presentation
//! layer decides how to show it.

use serde::Serialize;

use tiendita_core::Invoice;

/// Dialog severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

/// A dialog to show the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    fn new(kind: NoticeKind, title: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn product_added() -> Self {
        Self::new(NoticeKind::Success, "¡Producto agregado al carrito!", "")
    }

    #[must_use]
    pub fn empty_cart() -> Self {
        Self::new(
            NoticeKind::Warning,
            "Carrito vacío",
            "Agrega productos al carrito antes de pagar",
        )
    }

    #[must_use]
    pub fn incomplete_customer() -> Self {
        Self::new(
            NoticeKind::Warning,
            "Datos del cliente incompletos",
            "Por favor, ingrese todos los datos del cliente",
        )
    }

    /// Purchase confirmation with the full receipt.
    #[must_use]
    pub fn purchase_complete(invoice: &Invoice) -> Self {
        Self::new(NoticeKind::Success, "¡Compra realizada!", receipt(invoice))
    }

    #[must_use]
    pub fn purchase_failed() -> Self {
        Self::new(
            NoticeKind::Error,
            "Error al guardar la factura",
            "No se pudo registrar la compra. Su carrito no fue modificado.",
        )
    }

    #[must_use]
    pub fn empty_search_query() -> Self {
        Self::new(
            NoticeKind::Warning,
            "Campo de búsqueda vacío",
            "Por favor, ingrese un nombre, correo electrónico o teléfono para buscar la factura",
        )
    }

    #[must_use]
    pub fn invoice_not_found() -> Self {
        Self::new(
            NoticeKind::Warning,
            "Factura no encontrada",
            "No se encontraron facturas para el criterio de búsqueda proporcionado",
        )
    }

    #[must_use]
    pub fn invoices_found(invoices: &[Invoice]) -> Self {
        Self::new(
            NoticeKind::Success,
            "Facturas encontradas",
            search_results(invoices),
        )
    }
}

/// Receipt text shown after checkout.
#[must_use]
pub fn receipt(invoice: &Invoice) -> String {
    let mut lines = vec![
        "¡Compra realizada!".to_string(),
        String::new(),
        "Factura:".to_string(),
        format!("Número de factura: {}", invoice.id),
        format!("Nombre: {}", invoice.customer.name()),
        format!("Correo electrónico: {}", invoice.customer.email()),
        format!("Teléfono: {}", invoice.customer.phone()),
        String::new(),
        "Productos:".to_string(),
    ];
    lines.extend(
        invoice
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| format!("{}. {} - {}", index + 1, item.name, item.unit_price)),
    );
    lines.push(String::new());
    lines.push(format!("Total: {}", invoice.total));
    lines.join("\n")
}

/// One block per invoice, numbered in result order.
#[must_use]
pub fn search_results(invoices: &[Invoice]) -> String {
    let mut message = String::from("Facturas encontradas:\n\n");
    for (index, invoice) in invoices.iter().enumerate() {
        message.push_str(&format!(
            "Factura {}:\nNúmero de factura: {}\nNombre: {}\nCorreo electrónico: {}\nTeléfono: {}\nTotal: {}\nFecha: {}\n\n",
            index + 1,
            invoice.id,
            invoice.customer.name(),
            invoice.customer.email(),
            invoice.customer.phone(),
            invoice.total,
            invoice.created_at.to_rfc3339(),
        ));
    }
    message
}
