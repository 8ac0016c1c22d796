//! Price distribution chart
//!
//! Builds ECharts options with `charming` and renders the container plus the
//! initialization script for the dashboard page.

use charming::{
    component::{Axis, Grid, Title},
    element::{AxisPointer, AxisPointerType, AxisType, Tooltip, Trigger},
    series::bar::Bar,
    Chart,
};
use maud::{html, Markup, PreEscaped};

use crate::query::PriceRangeCount;

/// HTML element id of the chart container
pub(super) const PRICE_CHART_ID: &str = "price-range-chart";

/// Bar chart of record counts per price bucket
pub(super) fn price_range_chart(distribution: &[PriceRangeCount], month: &str) -> Chart {
    let labels: Vec<String> = distribution.iter().map(|b| b.range.to_string()).collect();
    let values: Vec<f64> = distribution.iter().map(|b| b.count as f64).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Price Range Distribution")
                .subtext(format!("Number of items sold in {}", month)),
        )
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow)),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(Axis::new().type_(AxisType::Value))
        .series(Bar::new().name("Number of Items").data(values))
}

/// Chart container followed by the script that draws into it
pub(super) fn chart_view(chart: &Chart) -> Markup {
    let script = format!(
        r#"document.addEventListener('DOMContentLoaded', function() {{
            const chart = echarts.init(document.getElementById("{}"));
            chart.setOption({});
            window.addEventListener('resize', chart.resize);
        }});"#,
        PRICE_CHART_ID, chart
    );

    html! {
        section class="chart" {
            div id=(PRICE_CHART_ID) style="min-height: 380px;" {}
            script { (PreEscaped(script)) }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_options_contain_bucket_labels_and_counts() {
        let distribution = vec![
            PriceRangeCount { range: "0-100", count: 3 },
            PriceRangeCount { range: "101-200", count: 0 },
        ];

        let options = price_range_chart(&distribution, "March").to_string();

        assert!(options.contains("\"0-100\""));
        assert!(options.contains("\"101-200\""));
        assert!(options.contains("Number of items sold in March"));
    }

    #[test]
    fn test_chart_view_targets_container() {
        let chart = price_range_chart(&[], "May");
        let markup = chart_view(&chart).into_string();

        assert!(markup.contains(r#"id="price-range-chart""#));
        assert!(markup.contains("echarts.init"));
    }
}
