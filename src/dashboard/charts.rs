//! Chart generation and rendering for the dashboard.
//!
//! This module creates ECharts visualizations from the monthly series of all
//! transactions:
//! - **Income vs Expenses**: monthly income and expense totals as two lines
//! - **Expenses by Category**: one line of monthly expenses per category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, ItemStyle,
        JsFunction, Tooltip, Trigger,
    },
    series::Line,
};
use maud::{Markup, PreEscaped, html};

use crate::{
    aggregation::{CategorySeries, OverviewSeries},
    currency::Currency,
    html::{CARD_STYLE, HeadElement},
};

/// The ECharts build loaded by pages that show charts.
pub(super) const ECHARTS_URL: &str =
    "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The heading shown above the chart
    pub title: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the chart containers, or a placeholder for each chart when there
/// are no transactions to plot.
pub(super) fn charts_view(charts: &[DashboardChart], titles: &[&str]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-6"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @if charts.is_empty() {
                    @for title in titles {
                        div class=(CARD_STYLE)
                        {
                            h3 class="text-lg font-medium mb-4" { (title) }

                            p class="chart-empty h-[300px] flex items-center justify-center
                                text-gray-500 dark:text-gray-400"
                            {
                                "No data available"
                            }
                        }
                    }
                } @else {
                    @for chart in charts {
                        div class=(CARD_STYLE)
                        {
                            h3 class="text-lg font-medium mb-4" { (chart.title) }

                            div
                                id=(chart.id)
                                class="min-h-[300px] rounded"
                            {}
                        }
                    }
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

pub(super) fn income_expense_chart(series: &OverviewSeries, currency: Currency) -> Chart {
    Chart::new()
        .tooltip(currency_tooltip(currency))
        .legend(Legend::new().top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(40)
                .contain_label(true),
        )
        .x_axis(
            Axis::new()
                .type_(AxisType::Category)
                .data(series.labels.clone()),
        )
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter(currency))),
        )
        .series(
            Line::new()
                .name("Income")
                .item_style(ItemStyle::new().color("#22c55e"))
                .data(series.income.clone()),
        )
        .series(
            Line::new()
                .name("Expenses")
                .item_style(ItemStyle::new().color("#ef4444"))
                .data(series.expense.clone()),
        )
}

/// One line per expense category over the months of the series.
///
/// Categories without any expenses in the series are left out of the chart.
pub(super) fn expenses_by_category_chart(
    labels: &[String],
    series: &[CategorySeries],
    currency: Currency,
) -> Chart {
    let mut chart = Chart::new()
        .tooltip(currency_tooltip(currency))
        .legend(Legend::new().top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(70)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels.to_vec()))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter(currency))),
        );

    for category in series
        .iter()
        .filter(|category| category.values.iter().any(|value| *value > 0.0))
    {
        chart = chart.series(
            Line::new()
                .name(category.name.as_str())
                .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
                .data(category.values.clone()),
        );
    }

    chart
}

fn number_locale(currency: Currency) -> &'static str {
    match currency {
        Currency::Zar => "en-ZA",
        Currency::Inr => "en-IN",
    }
}

#[inline]
fn currency_formatter(currency: Currency) -> JsFunction {
    JsFunction::new_with_args(
        "number",
        &format!(
            "const currencyFormatter = new Intl.NumberFormat('{}', {{
              style: 'currency',
              currency: '{}'
            }});
            return (number) ? currencyFormatter.format(number) : \"-\";",
            number_locale(currency),
            currency.code(),
        ),
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip(currency: Currency) -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter(currency))
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Line))
}
