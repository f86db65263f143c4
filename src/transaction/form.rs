//! The form for adding a transaction and the category fields it swaps in
//! when the transaction type or category changes.

use std::sync::Arc;

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState,
    category::{Category, CategoryCatalog, CategoryId},
    data_source::DataSource,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, CARD_STYLE, FORM_LABEL_STYLE, FORM_RADIO_INPUT_STYLE,
        FORM_RADIO_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, loading_spinner,
    },
    transaction::{TransactionKind, non_empty},
    view_state::{ViewState, empty_as_none},
};

const CATEGORY_FIELDS_ID: &str = "category-fields";

/// The form for adding a transaction, posting to [endpoints::TRANSACTIONS].
///
/// The currency of `view` is sent along so that the dashboard keeps it after
/// the redirect.
pub fn transaction_form(view: &ViewState, catalog: &CategoryCatalog, today: Date) -> Markup {
    let kind = TransactionKind::default();

    html! {
        section id="transaction-form" class=(CARD_STYLE)
        {
            h3 class="text-lg font-medium mb-4" { "Add New Transaction" }

            form
                hx-post=(endpoints::TRANSACTIONS)
                hx-target-error="#alert-container"
                hx-indicator="#indicator"
                class="grid gap-4"
            {
                input type="hidden" name="currency" value=(view.currency.code());

                div class="grid grid-cols-1 md:grid-cols-2 gap-4"
                {
                    fieldset
                    {
                        legend class=(FORM_LABEL_STYLE) { "Type" }

                        div class="flex items-center gap-4"
                        {
                            @for option in [TransactionKind::Expense, TransactionKind::Income] {
                                div class="flex items-center gap-3"
                                {
                                    input
                                        name="kind"
                                        id={ "transaction-kind-" (option) }
                                        type="radio"
                                        value=(option)
                                        checked[option == kind]
                                        required
                                        hx-get=(endpoints::CATEGORY_FIELDS)
                                        hx-trigger="change"
                                        hx-target={ "#" (CATEGORY_FIELDS_ID) }
                                        hx-swap="outerHTML"
                                        hx-include="this"
                                        class=(FORM_RADIO_INPUT_STYLE);

                                    label
                                        for={ "transaction-kind-" (option) }
                                        class=(FORM_RADIO_LABEL_STYLE)
                                    {
                                        (option.label())
                                    }
                                }
                            }
                        }
                    }

                    div
                    {
                        label for="amount" class=(FORM_LABEL_STYLE) { "Amount" }

                        input
                            name="amount"
                            id="amount"
                            type="number"
                            step="0.01"
                            min="0"
                            placeholder="Enter amount"
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label for="description" class=(FORM_LABEL_STYLE) { "Description" }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="Enter description"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                    input
                        name="date"
                        id="date"
                        type="date"
                        value=(today)
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                (category_fields(catalog, kind, None))

                button
                    type="submit"
                    id="indicator"
                    class={ (BUTTON_PRIMARY_STYLE) " md:w-auto md:self-end mt-2" }
                {
                    span class="htmx-indicator" { (loading_spinner()) }
                    "Add Transaction"
                }
            }
        }
    }
}

/// The category and subcategory selects for transactions of `kind`.
///
/// Only categories from the pool of `kind` are offered. When a category is
/// selected, its subcategories are listed with the first one preselected.
pub fn category_fields(
    catalog: &CategoryCatalog,
    kind: TransactionKind,
    selected_category: Option<&CategoryId>,
) -> Markup {
    let categories: Vec<&Category> = catalog.of_kind(kind).collect();
    let selected = selected_category
        .and_then(|id| categories.iter().copied().find(|category| &category.id == id));

    html! {
        div id=(CATEGORY_FIELDS_ID) class="grid gap-4"
        {
            div
            {
                label for="category_id" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    name="category_id"
                    id="category_id"
                    required
                    hx-get=(endpoints::CATEGORY_FIELDS)
                    hx-trigger="change"
                    hx-target={ "#" (CATEGORY_FIELDS_ID) }
                    hx-swap="outerHTML"
                    hx-include="[name='kind']:checked"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" selected[selected.is_none()] { "Select a category" }

                    @for category in &categories {
                        option
                            value=(category.id)
                            selected[selected.is_some_and(|s| s.id == category.id)]
                        {
                            (category.name)
                        }
                    }
                }
            }

            div
            {
                label for="subcategory_id" class=(FORM_LABEL_STYLE) { "Subcategory" }

                select
                    name="subcategory_id"
                    id="subcategory_id"
                    required
                    disabled[selected.is_none()]
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    @match selected {
                        Some(category) => {
                            @for (index, subcategory) in category.subcategories.iter().enumerate() {
                                option value=(subcategory.id) selected[index == 0] {
                                    (subcategory.name)
                                }
                            }
                        }
                        None => {
                            option value="" selected { "Select a category first" }
                        }
                    }
                }
            }
        }
    }
}

/// The state needed to render the category fields.
#[derive(Debug, Clone)]
pub struct CategoryFieldsState {
    pub data_source: Arc<dyn DataSource>,
}

impl FromRef<AppState> for CategoryFieldsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            data_source: state.data_source.clone(),
        }
    }
}

/// The query for [get_category_fields], e.g. `?kind=income&category_id=cat_salary`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryFieldsQuery {
    #[serde(default)]
    pub kind: TransactionKind,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub category_id: Option<String>,
}

/// Render the category fields for the selected transaction kind and category.
pub async fn get_category_fields(
    State(state): State<CategoryFieldsState>,
    Query(query): Query<CategoryFieldsQuery>,
) -> Response {
    let catalog = match state.data_source.catalog() {
        Ok(catalog) => catalog,
        Err(error) => {
            tracing::error!("could not get categories: {error}");
            return error.into_alert_response();
        }
    };

    let selected = non_empty(query.category_id).map(|id| CategoryId::new(&id));

    category_fields(&catalog, query.kind, selected.as_ref()).into_response()
}
