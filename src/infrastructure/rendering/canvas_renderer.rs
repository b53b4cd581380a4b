use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::geometry::{CandleGeometry, LineGeometry, PlotArea, PriceScale, candle_geometry, label_indices, line_geometry};
use crate::domain::{
    chart::ChartSeries,
    logging::{LogComponent, get_logger},
    market_data::Symbol,
    state::ChartView,
};
use crate::time_utils::format_time_labels;

const BACKGROUND: &str = "#ffffff";
const GRID: &str = "#e5e7eb";
const AXIS_TEXT: &str = "#374151";
const LINE_STROKE: &str = "rgba(75,192,192,1)";
const LINE_FILL: &str = "rgba(75,192,192,0.2)";
const BULLISH: &str = "#00b746";
const BEARISH: &str = "#ef403c";
const PRICE_TICKS: usize = 6;
const TIME_LABELS: usize = 8;

/// Canvas 2D renderer for the line and candlestick views
pub struct CanvasRenderer {
    width: u32,
    height: u32,
}

impl CanvasRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    fn context(&self, canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
        canvas.set_width(self.width);
        canvas.set_height(self.height);
        canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2D context not available"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("Failed to cast to 2D context"))
    }

    /// Draws `view` if it is a chart view; other views only clear the canvas.
    pub fn render(&self, canvas: &HtmlCanvasElement, view: &ChartView) -> Result<(), JsValue> {
        let context = self.context(canvas)?;
        let area = PlotArea::new(self.width, self.height);

        context.set_fill_style_str(BACKGROUND);
        context.fill_rect(0.0, 0.0, area.width, area.height);

        match view {
            ChartView::Line { symbol, series } => self.render_line(&context, &area, symbol, series),
            ChartView::Candlestick { symbol, series } => {
                self.render_candles(&context, &area, symbol, series)
            }
            _ => Ok(()),
        }
    }

    fn render_line(
        &self,
        ctx: &CanvasRenderingContext2d,
        area: &PlotArea,
        symbol: &Symbol,
        series: &ChartSeries,
    ) -> Result<(), JsValue> {
        let Some(LineGeometry { scale, points }) = line_geometry(&series.line, area) else {
            return Ok(());
        };
        self.render_grid(ctx, area, &scale)?;

        if let (Some(first), Some(last)) = (points.first(), points.last()) {
            ctx.begin_path();
            ctx.move_to(first.0, area.bottom());
            for (x, y) in &points {
                ctx.line_to(*x, *y);
            }
            ctx.line_to(last.0, area.bottom());
            ctx.close_path();
            ctx.set_fill_style_str(LINE_FILL);
            ctx.fill();

            ctx.begin_path();
            ctx.move_to(first.0, first.1);
            for (x, y) in points.iter().skip(1) {
                ctx.line_to(*x, *y);
            }
            ctx.set_stroke_style_str(LINE_STROKE);
            ctx.set_line_width(2.0);
            ctx.stroke();
        }

        self.render_time_labels(ctx, area, &series.line.timestamps())?;
        self.render_axis_titles(ctx, area)?;

        // legend
        ctx.set_fill_style_str(LINE_STROKE);
        ctx.fill_rect(area.left(), 12.0, 30.0, 10.0);
        ctx.set_fill_style_str(AXIS_TEXT);
        ctx.set_font("12px sans-serif");
        ctx.fill_text(&format!("{} Price", symbol), area.left() + 38.0, 21.0)?;

        get_logger().debug(
            LogComponent::Infrastructure("CanvasRenderer"),
            &format!("📈 Line chart: {} points", points.len()),
        );
        Ok(())
    }

    fn render_candles(
        &self,
        ctx: &CanvasRenderingContext2d,
        area: &PlotArea,
        symbol: &Symbol,
        series: &ChartSeries,
    ) -> Result<(), JsValue> {
        let Some(CandleGeometry { scale, candles }) = candle_geometry(&series.candles, area) else {
            return Ok(());
        };
        self.render_grid(ctx, area, &scale)?;

        ctx.set_line_width(1.0);
        for candle in &candles {
            let color = if candle.is_bullish { BULLISH } else { BEARISH };
            ctx.set_stroke_style_str(color);
            ctx.set_fill_style_str(color);

            ctx.begin_path();
            ctx.move_to(candle.x, candle.high_y);
            ctx.line_to(candle.x, candle.low_y);
            ctx.stroke();

            let left = candle.x - candle.body_width / 2.0;
            if candle.body_height() < 1.0 {
                // doji
                ctx.begin_path();
                ctx.move_to(left, candle.open_y);
                ctx.line_to(left + candle.body_width, candle.open_y);
                ctx.stroke();
            } else if candle.is_bullish {
                ctx.stroke_rect(left, candle.body_top(), candle.body_width, candle.body_height());
            } else {
                ctx.fill_rect(left, candle.body_top(), candle.body_width, candle.body_height());
            }
        }

        self.render_time_labels(ctx, area, &series.candles.timestamps())?;
        self.render_axis_titles(ctx, area)?;

        ctx.set_fill_style_str(AXIS_TEXT);
        ctx.set_font("12px sans-serif");
        ctx.fill_text(symbol.value(), area.left(), 21.0)?;

        get_logger().debug(
            LogComponent::Infrastructure("CanvasRenderer"),
            &format!("🕯️ Candlestick chart: {} candles", candles.len()),
        );
        Ok(())
    }

    fn render_grid(
        &self,
        ctx: &CanvasRenderingContext2d,
        area: &PlotArea,
        scale: &PriceScale,
    ) -> Result<(), JsValue> {
        ctx.set_line_width(1.0);
        ctx.set_font("11px sans-serif");
        for price in scale.ticks(PRICE_TICKS) {
            let y = scale.y_for(price, area);
            ctx.set_stroke_style_str(GRID);
            ctx.begin_path();
            ctx.move_to(area.left(), y);
            ctx.line_to(area.right(), y);
            ctx.stroke();

            ctx.set_fill_style_str(AXIS_TEXT);
            ctx.fill_text(&format!("{:.2}", price), area.padding, y + 4.0)?;
        }
        Ok(())
    }

    /// Labels rotated -45° under the plot.
    fn render_time_labels(
        &self,
        ctx: &CanvasRenderingContext2d,
        area: &PlotArea,
        timestamps: &[&str],
    ) -> Result<(), JsValue> {
        let indices = label_indices(timestamps.len(), TIME_LABELS);
        let labels = format_time_labels(timestamps, &indices);

        ctx.set_fill_style_str(AXIS_TEXT);
        ctx.set_font("11px sans-serif");
        for (index, label) in indices.iter().zip(labels) {
            let x = area.x_for(*index, timestamps.len());
            ctx.save();
            ctx.translate(x, area.bottom() + 12.0)?;
            ctx.rotate(-std::f64::consts::FRAC_PI_4)?;
            ctx.set_text_align("right");
            ctx.fill_text(&label, 0.0, 0.0)?;
            ctx.restore();
        }
        Ok(())
    }

    fn render_axis_titles(&self, ctx: &CanvasRenderingContext2d, area: &PlotArea) -> Result<(), JsValue> {
        ctx.set_fill_style_str(AXIS_TEXT);
        ctx.set_font("bold 12px sans-serif");
        ctx.set_text_align("center");
        ctx.fill_text("Time", area.left() + area.plot_width() / 2.0, area.height - 8.0)?;

        ctx.save();
        ctx.translate(12.0, area.top() + area.plot_height() / 2.0)?;
        ctx.rotate(-std::f64::consts::FRAC_PI_2)?;
        ctx.fill_text("Price (USD)", 0.0, 0.0)?;
        ctx.restore();
        ctx.set_text_align("start");
        Ok(())
    }
}
