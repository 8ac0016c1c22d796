//! Dashboard markup

use maud::{html, Markup, DOCTYPE};

use super::charts::{chart_view, price_range_chart};
use super::{DashboardData, DashboardQuery};
use crate::domain::{ProductTransaction, MONTHS};
use crate::query::Statistics;

const ECHARTS_SRC: &str = "https://cdn.jsdelivr.net/npm/echarts@5/dist/echarts.min.js";

const STYLE: &str = r#"
    body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 72rem; color: #1f2937; }
    form.filters { display: flex; gap: 1rem; margin-bottom: 1rem; }
    table { width: 100%; border-collapse: collapse; border: 1px solid #ddd; }
    th, td { padding: 8px; text-align: left; border-bottom: 1px solid #ddd; }
    .pager { margin: 10px 0 2rem; display: flex; gap: 1rem; align-items: center; }
    .cards { display: flex; gap: 20px; margin: 20px 0; }
    .card { flex: 1; border: 1px solid #ddd; border-radius: 5px; padding: 20px;
            text-align: center; background: #f9f9f9; box-shadow: 0 0 10px rgba(0,0,0,0.1); }
"#;

pub(super) fn dashboard_view(query: &DashboardQuery, data: &DashboardData) -> Markup {
    let chart = price_range_chart(&data.price_ranges, query.month.name());

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "Transaction Dashboard" }
                style { (maud::PreEscaped(STYLE)) }
                script src=(ECHARTS_SRC) {}
            }
            body {
                h1 { "Transaction Dashboard" }
                (filters_view(query))
                (transactions_table(&data.transactions.products))
                (pager_view(query, data.transactions.pagination.total_pages))
                h2 { "Statistics - " (query.month.name()) }
                (statistics_cards(&data.statistics))
                (chart_view(&chart))
            }
        }
    }
}

fn filters_view(query: &DashboardQuery) -> Markup {
    html! {
        form class="filters" method="get" action="/" {
            select name="month" onchange="this.form.submit()" {
                @for month in MONTHS {
                    option value=(month.name()) selected[month == query.month] { (month.name()) }
                }
            }
            input type="search" name="search" placeholder="Search transactions..." value=(query.search);
            button type="submit" { "Search" }
        }
    }
}

fn transactions_table(products: &[ProductTransaction]) -> Markup {
    html! {
        table {
            thead {
                tr {
                    th { "ID" }
                    th { "Title" }
                    th { "Description" }
                    th { "Price" }
                    th { "Category" }
                    th { "Sold" }
                    th { "Date of Sale" }
                }
            }
            tbody {
                @if products.is_empty() {
                    tr { td colspan="7" { "No transactions found" } }
                }
                @for product in products {
                    tr {
                        td { (product.id) }
                        td { (product.title) }
                        td { (product.description) }
                        td { "$" (product.price.to_string()) }
                        td { (product.category) }
                        td { @if product.sold { "Yes" } @else { "No" } }
                        td { (product.date_of_sale.format("%Y-%m-%d").to_string()) }
                    }
                }
            }
        }
    }
}

fn pager_view(query: &DashboardQuery, total_pages: u64) -> Markup {
    let has_previous = query.page > 1;
    let has_next = u64::from(query.page) < total_pages;

    html! {
        div class="pager" {
            @if has_previous {
                a href=(query.with_page(query.page - 1).href()) { "Previous" }
            } @else {
                span { "Previous" }
            }
            span { "Page " (query.page) " of " (total_pages.max(1)) }
            @if has_next {
                a href=(query.with_page(query.page + 1).href()) { "Next" }
            } @else {
                span { "Next" }
            }
        }
    }
}

fn statistics_cards(statistics: &Statistics) -> Markup {
    html! {
        div class="cards" {
            div class="card" {
                h3 { "Total Sale Amount" }
                p { "$" (statistics.total_sale_amount.to_string()) }
            }
            div class="card" {
                h3 { "Total Sold Items" }
                p { (statistics.total_sold_items) }
            }
            div class="card" {
                h3 { "Total Not Sold Items" }
                p { (statistics.total_not_sold_items) }
            }
        }
    }
}
