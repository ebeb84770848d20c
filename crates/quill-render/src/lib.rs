//! # quill-render: Quote Document Rendering
//!
//! Renders a finalized quote as a self-contained printable HTML document.
//!
//! ## Document Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Company name, address, phone, email     │            QUOTATION         │
//! │                                          │            #Q-17249...       │
//! │                                          │            Date / Valid Until│
//! ├──────────────────────────────────────────┴──────────────────────────────┤
//! │  Quote To:  client name, email, address                                 │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  SR │ Product Description │ HSN/SAC │ QTY │ Rate │ Tax % │ Tax │ Total │
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │                                      Subtotal / Tax / CGST / SGST / Total│
//! ├─────────────────────────────────────────────────────────────────────────┤
//! │  Notes                                                                  │
//! │  Thank you for your business!  Tax ID: ...                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All money figures come from the totals engine over the quote's line
//! items; the quote's cached totals are not trusted here. Dangling
//! product references render as "Unknown Product" at the default rate,
//! matching the engine's weak-reference policy.
//!
//! Pure string-to-string: no I/O, no async. Every user-supplied value is
//! HTML-escaped.

use quill_core::totals::{catalog_resolver, compute_totals, product_display_name};
use quill_core::{Company, Product, Quote, TaxRate, DEFAULT_HSN_SAC};

// =============================================================================
// Escaping
// =============================================================================

/// Escapes a string for use in HTML text content and attribute values.
fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escapes a multi-line value, turning line breaks into `<br>`.
fn escape_multiline(input: &str) -> String {
    escape(input).replace('\n', "<br>")
}

// =============================================================================
// Catalog Lookups
// =============================================================================

fn product_description<'a>(products: &'a [Product], product_id: &str) -> &'a str {
    products
        .iter()
        .find(|p| p.id == product_id)
        .map(|p| p.description.as_str())
        .unwrap_or("")
}

fn product_hsn_sac<'a>(products: &'a [Product], product_id: &str) -> &'a str {
    products
        .iter()
        .find(|p| p.id == product_id)
        .map(|p| p.hsn_sac.as_str())
        .unwrap_or(DEFAULT_HSN_SAC)
}

// =============================================================================
// Renderer
// =============================================================================

/// Renders a quote as a complete HTML document.
///
/// ## Arguments
/// * `company` - the profile printed in the header; an empty profile
///   renders with the "Your Company" placeholder
/// * `quote` - the finalized quote snapshot
/// * `products` - the current catalog, used for names, HSN/SAC codes and
///   per-line tax rates
pub fn render_quote(company: &Company, quote: &Quote, products: &[Product]) -> String {
    let totals = compute_totals(&quote.items, catalog_resolver(products));
    let split = totals.tax_split();

    let mut html = String::with_capacity(8 * 1024);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str(&format!(
        "<meta charset=\"utf-8\">\n<title>Quote {}</title>\n",
        escape(&quote.quote_number)
    ));
    html.push_str(STYLE);
    html.push_str("</head>\n<body>\n");

    // Header: company block left, quote block right
    html.push_str("<div class=\"header\">\n<div class=\"company-info\">\n");
    let company_name = if company.name.is_empty() {
        "Your Company"
    } else {
        company.name.as_str()
    };
    html.push_str(&format!("<h1>{}</h1>\n", escape(company_name)));
    let address = company.display_address();
    if !address.is_empty() {
        html.push_str(&format!("<p>{}</p>\n", escape_multiline(&address)));
    }
    if !company.phone.is_empty() {
        html.push_str(&format!("<p>Phone: {}</p>\n", escape(&company.phone)));
    }
    if !company.email.is_empty() {
        html.push_str(&format!("<p>Email: {}</p>\n", escape(&company.email)));
    }
    if !company.website.is_empty() {
        html.push_str(&format!("<p>Website: {}</p>\n", escape(&company.website)));
    }
    html.push_str("</div>\n<div class=\"quote-info\">\n<h2>QUOTATION</h2>\n");
    html.push_str(&format!("<p class=\"number\">#{}</p>\n", escape(&quote.quote_number)));
    html.push_str(&format!("<p>Date: {}</p>\n", quote.date.format("%b %d, %Y")));
    html.push_str(&format!(
        "<p>Valid Until: {}</p>\n",
        quote.valid_until.format("%b %d, %Y")
    ));
    html.push_str("</div>\n</div>\n");

    // Client block
    html.push_str("<div class=\"client-info\">\n<h3>Quote To:</h3>\n<div class=\"client-box\">\n");
    html.push_str(&format!("<p class=\"name\">{}</p>\n", escape(&quote.client_name)));
    if !quote.client_email.is_empty() {
        html.push_str(&format!("<p>{}</p>\n", escape(&quote.client_email)));
    }
    if !quote.client_address.is_empty() {
        html.push_str(&format!("<p>{}</p>\n", escape_multiline(&quote.client_address)));
    }
    html.push_str("</div>\n</div>\n");

    // Items table
    html.push_str(
        "<table class=\"items\">\n<thead>\n<tr>\
         <th>SR</th>\
         <th>Product Description</th>\
         <th>HSN/SAC</th>\
         <th>QTY</th>\
         <th>Rate</th>\
         <th>Tax Rate(%)</th>\
         <th>Tax Amount</th>\
         <th>Total</th>\
         </tr>\n</thead>\n<tbody>\n",
    );

    for (index, item) in quote.items.iter().enumerate() {
        let line = &totals.per_line[index];
        let rate = catalog_resolver(products)(&item.product_id).unwrap_or_default();

        html.push_str("<tr>");
        html.push_str(&format!("<td>{}</td>", index + 1));

        let name = product_display_name(products, &item.product_id);
        let description = product_description(products, &item.product_id);
        if description.is_empty() {
            html.push_str(&format!("<td><strong>{}</strong></td>", escape(name)));
        } else {
            html.push_str(&format!(
                "<td><strong>{}</strong><div class=\"desc\">{}</div></td>",
                escape(name),
                escape(description)
            ));
        }

        html.push_str(&format!(
            "<td class=\"center\">{}</td>",
            escape(product_hsn_sac(products, &item.product_id))
        ));
        html.push_str(&format!("<td class=\"center\">{}</td>", item.quantity));
        html.push_str(&format!("<td class=\"right\">{}</td>", item.unit_price()));
        html.push_str(&format!("<td class=\"center\">{:.2}</td>", rate.percentage()));
        html.push_str(&format!("<td class=\"right\">{}</td>", line.line_tax));
        html.push_str(&format!("<td class=\"right\">{}</td>", line.line_total));
        html.push_str("</tr>\n");
    }
    html.push_str("</tbody>\n</table>\n");

    // Totals box
    html.push_str("<div class=\"totals\">\n");
    html.push_str(&format!(
        "<div class=\"row\"><span>Subtotal:</span><span>{}</span></div>\n",
        totals.subtotal
    ));
    html.push_str(&format!(
        "<div class=\"row\"><span>Tax:</span><span>{}</span></div>\n",
        totals.tax_total
    ));
    html.push_str(&format!(
        "<div class=\"row\"><span>CGST:</span><span>{}</span></div>\n",
        split.cgst
    ));
    html.push_str(&format!(
        "<div class=\"row\"><span>SGST:</span><span>{}</span></div>\n",
        split.sgst
    ));
    html.push_str(&format!(
        "<div class=\"row grand\"><span>Total:</span><span>{}</span></div>\n",
        totals.total
    ));
    html.push_str("</div>\n");

    // Notes
    if !quote.notes.is_empty() {
        html.push_str(&format!(
            "<div class=\"notes\">\n<h3>Notes:</h3>\n<p>{}</p>\n</div>\n",
            escape_multiline(&quote.notes)
        ));
    }

    // Footer
    html.push_str("<div class=\"footer\">\n<p>Thank you for your business!</p>\n");
    if !company.tax_id.is_empty() {
        html.push_str(&format!("<p>Tax ID: {}</p>\n", escape(&company.tax_id)));
    }
    html.push_str("</div>\n</body>\n</html>\n");

    html
}

/// Returns the tax rate used for a line's display column.
///
/// Exposed so the CLI's plain-text quote view shows the same rate the
/// document renderer prints.
pub fn line_tax_rate(products: &[Product], product_id: &str) -> TaxRate {
    catalog_resolver(products)(product_id).unwrap_or_default()
}

/// Print-friendly inline stylesheet.
const STYLE: &str = "<style>\n\
    body { font-family: Arial, sans-serif; margin: 20px; color: #1a1a1a; }\n\
    .header { display: flex; justify-content: space-between; border-bottom: 2px solid #333; padding-bottom: 20px; margin-bottom: 20px; }\n\
    .company-info h1 { color: #2563eb; margin: 0 0 8px 0; }\n\
    .company-info p { margin: 2px 0; font-size: 13px; color: #555; }\n\
    .quote-info { text-align: right; }\n\
    .quote-info h2 { margin: 0; font-size: 28px; }\n\
    .quote-info .number { font-weight: bold; }\n\
    .quote-info p { margin: 2px 0; font-size: 13px; color: #555; }\n\
    .client-info { margin: 20px 0; }\n\
    .client-box { background: #f8f8f8; padding: 12px; border-radius: 4px; }\n\
    .client-box .name { font-weight: bold; margin: 0 0 4px 0; }\n\
    .client-box p { margin: 2px 0; font-size: 13px; color: #555; }\n\
    table.items { width: 100%; border-collapse: collapse; margin: 20px 0; }\n\
    table.items th, table.items td { border: 1px solid #ddd; padding: 8px; text-align: left; font-size: 13px; }\n\
    table.items th { background-color: #f2f2f2; }\n\
    table.items .center { text-align: center; }\n\
    table.items .right { text-align: right; }\n\
    table.items .desc { font-size: 12px; color: #666; }\n\
    .totals { width: 280px; margin-left: auto; border: 1px solid #ddd; border-radius: 4px; }\n\
    .totals .row { display: flex; justify-content: space-between; padding: 8px 12px; border-bottom: 1px solid #eee; }\n\
    .totals .grand { font-weight: bold; background: #f8f8f8; border-bottom: none; }\n\
    .notes { margin-top: 24px; }\n\
    .notes p { font-size: 13px; color: #555; }\n\
    .footer { margin-top: 32px; padding-top: 16px; border-top: 1px solid #ccc; text-align: center; font-size: 12px; color: #888; }\n\
</style>\n";

// =============================================================================
// Unit Tests
// =============================================================================
