use crate::error::{Result, ZipfError};
use crate::glyphs::{self, ADVANCE, GLYPH_HEIGHT};
use crate::rank::WordOccurrence;
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const BAR_COLOR: Rgb<u8> = Rgb([0, 116, 217]);
const AXIS_COLOR: Rgb<u8> = Rgb([51, 51, 51]);
const GRID_COLOR: Rgb<u8> = Rgb([224, 224, 224]);

const TITLE_SCALE: u32 = 3;
const LABEL_SCALE: u32 = 2;
const MARGIN: u32 = 20;
const TICK_LENGTH: u32 = 6;
const Y_TICKS: u32 = 5;
const MAX_WIDTH: u64 = 32_768;

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// Bar chart settings plus the bars to draw, left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: String,
    pub height: u32,
    pub bar_width: u32,
    pub bar_spacing: u32,
    pub padding_top: u32,
    pub y_min: f64,
    pub y_max: f64,
    pub bars: Vec<Bar>,
}

impl BarChart {
    /// Chart of ranked words; the value axis spans zero to the first (largest) count.
    pub fn from_occurrences(words: &[WordOccurrence]) -> Result<Self> {
        let first = words.first().ok_or(ZipfError::EmptySelection)?;
        Ok(BarChart {
            title: "Words by occurrence".to_string(),
            height: 1024,
            bar_width: 80,
            bar_spacing: 10,
            padding_top: 40,
            y_min: 0.0,
            y_max: first.count as f64,
            bars: words
                .iter()
                .map(|w| Bar {
                    label: w.word.clone(),
                    value: w.count as f64,
                })
                .collect(),
        })
    }

    pub fn render_png(&self) -> Result<Vec<u8>> {
        let image = self.draw()?;
        let mut buffer = Cursor::new(Vec::new());
        image
            .write_to(&mut buffer, ImageFormat::Png)
            .map_err(|e| ZipfError::Chart(e.to_string()))?;
        Ok(buffer.into_inner())
    }

    pub fn draw(&self) -> Result<RgbImage> {
        if self.bars.is_empty() {
            return Err(ZipfError::EmptySelection);
        }
        if !(self.y_max > self.y_min) {
            return Err(ZipfError::Chart(format!(
                "invalid value range [{}, {}]",
                self.y_min, self.y_max
            )));
        }
        let layout = self.layout()?;
        let mut image = RgbImage::from_pixel(layout.width, self.height, BACKGROUND);

        let title_x = layout.width.saturating_sub(glyphs::text_width(&self.title, TITLE_SCALE)) / 2;
        draw_text(&mut image, title_x, MARGIN, &self.title, TITLE_SCALE, AXIS_COLOR);

        self.draw_value_axis(&mut image, &layout);

        let slot = layout.bar_width + layout.bar_spacing;
        let max_label_chars = (slot / (ADVANCE * LABEL_SCALE)) as usize;
        for (i, bar) in self.bars.iter().enumerate() {
            let x = layout.plot_left + layout.bar_spacing + i as u32 * slot;
            let bar_height = layout.scale(bar.value, self.y_min, self.y_max);
            fill_rect(
                &mut image,
                x,
                layout.plot_bottom - bar_height,
                layout.bar_width,
                bar_height,
                BAR_COLOR,
            );

            // too narrow for even one character
            if max_label_chars == 0 {
                continue;
            }
            let label: String = bar.label.chars().take(max_label_chars).collect();
            let label_x = (x + layout.bar_width / 2)
                .saturating_sub(glyphs::text_width(&label, LABEL_SCALE) / 2);
            draw_text(
                &mut image,
                label_x,
                layout.plot_bottom + TICK_LENGTH + 4,
                &label,
                LABEL_SCALE,
                AXIS_COLOR,
            );
        }

        fill_rect(
            &mut image,
            layout.plot_left,
            layout.plot_bottom,
            layout.width - layout.plot_left - MARGIN,
            1,
            AXIS_COLOR,
        );
        Ok(image)
    }

    fn draw_value_axis(&self, image: &mut RgbImage, layout: &Layout) {
        for tick in 0..Y_TICKS {
            let value = self.y_min + (self.y_max - self.y_min) * tick as f64 / (Y_TICKS - 1) as f64;
            let y = layout.plot_bottom - layout.scale(value, self.y_min, self.y_max);
            if tick > 0 {
                fill_rect(
                    image,
                    layout.plot_left + 1,
                    y,
                    layout.width - layout.plot_left - MARGIN - 1,
                    1,
                    GRID_COLOR,
                );
            }
            fill_rect(image, layout.plot_left - TICK_LENGTH, y, TICK_LENGTH, 1, AXIS_COLOR);

            let label = format_tick(value);
            let label_x = (layout.plot_left - TICK_LENGTH - 4)
                .saturating_sub(glyphs::text_width(&label, LABEL_SCALE));
            let label_y = y.saturating_sub(GLYPH_HEIGHT * LABEL_SCALE / 2);
            draw_text(image, label_x, label_y, &label, LABEL_SCALE, AXIS_COLOR);
        }
        fill_rect(
            image,
            layout.plot_left,
            layout.plot_top,
            1,
            layout.plot_bottom - layout.plot_top + 1,
            AXIS_COLOR,
        );
    }

    fn layout(&self) -> Result<Layout> {
        let widest_tick = (0..Y_TICKS)
            .map(|tick| {
                let value =
                    self.y_min + (self.y_max - self.y_min) * tick as f64 / (Y_TICKS - 1) as f64;
                glyphs::text_width(&format_tick(value), LABEL_SCALE)
            })
            .max()
            .unwrap_or(0);
        let plot_left = MARGIN + widest_tick + TICK_LENGTH + 4;
        let plot_top = MARGIN + GLYPH_HEIGHT * TITLE_SCALE + self.padding_top;
        let label_band = TICK_LENGTH + 4 + GLYPH_HEIGHT * LABEL_SCALE + MARGIN;
        if self.height <= plot_top + label_band {
            return Err(ZipfError::Chart(format!(
                "height {} leaves no room to plot",
                self.height
            )));
        }
        let plot_bottom = self.height - label_band;

        let (bar_width, bar_spacing) = self.fit_bars(plot_left)?;
        let bars_width =
            self.bars.len() as u64 * (bar_width + bar_spacing) as u64 + bar_spacing as u64;
        let title_width = glyphs::text_width(&self.title, TITLE_SCALE) as u64 + 2 * MARGIN as u64;
        let width = (plot_left as u64 + bars_width + MARGIN as u64).max(title_width);
        Ok(Layout {
            width: width as u32,
            plot_left,
            bar_width,
            bar_spacing,
            plot_top,
            plot_bottom,
        })
    }

    /// Bar and gap widths, narrowed in proportion when the requested ones
    /// would push the image past `MAX_WIDTH`.
    fn fit_bars(&self, plot_left: u32) -> Result<(u32, u32)> {
        let bars = self.bars.len() as u64;
        let slot = (self.bar_width + self.bar_spacing) as u64;
        let room = MAX_WIDTH.saturating_sub(plot_left as u64 + MARGIN as u64);
        if bars * slot + self.bar_spacing as u64 <= room {
            return Ok((self.bar_width, self.bar_spacing));
        }
        let narrowed = room / (bars + 1);
        if narrowed == 0 {
            return Err(ZipfError::Chart(format!(
                "{} bars do not fit in a {} pixel wide image",
                bars, MAX_WIDTH
            )));
        }
        let spacing = narrowed * self.bar_spacing as u64 / slot;
        Ok(((narrowed - spacing) as u32, spacing as u32))
    }
}

struct Layout {
    width: u32,
    plot_left: u32,
    bar_width: u32,
    bar_spacing: u32,
    plot_top: u32,
    plot_bottom: u32,
}

impl Layout {
    /// Pixel height of `value` above the x axis.
    fn scale(&self, value: f64, min: f64, max: f64) -> u32 {
        let span = (self.plot_bottom - self.plot_top) as f64;
        let ratio = ((value - min) / (max - min)).clamp(0.0, 1.0);
        (ratio * span).round() as u32
    }
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn fill_rect(image: &mut RgbImage, x: u32, y: u32, width: u32, height: u32, color: Rgb<u8>) {
    let x_end = x.saturating_add(width).min(image.width());
    let y_end = y.saturating_add(height).min(image.height());
    for py in y..y_end {
        for px in x..x_end {
            image.put_pixel(px, py, color);
        }
    }
}

fn draw_text(image: &mut RgbImage, x: u32, y: u32, text: &str, scale: u32, color: Rgb<u8>) {
    for (i, c) in text.chars().enumerate() {
        let origin = x + i as u32 * ADVANCE * scale;
        for (row, bits) in glyphs::glyph(c).iter().enumerate() {
            for col in 0..glyphs::GLYPH_WIDTH {
                if bits & (1 << (glyphs::GLYPH_WIDTH - 1 - col)) != 0 {
                    fill_rect(
                        image,
                        origin + col * scale,
                        y + row as u32 * scale,
                        scale,
                        scale,
                        color,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> Vec<WordOccurrence> {
        vec![
            WordOccurrence::new("cat", 3),
            WordOccurrence::new("a", 2),
            WordOccurrence::new("the", 2),
        ]
    }

    #[test]
    fn value_axis_spans_zero_to_first_count() {
        let chart = BarChart::from_occurrences(&words()).unwrap();
        assert_eq!(chart.y_min, 0.0);
        assert_eq!(chart.y_max, 3.0);
        let labels: Vec<&str> = chart.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["cat", "a", "the"]);
    }

    #[test]
    fn empty_selection_is_an_error() {
        assert!(matches!(
            BarChart::from_occurrences(&[]),
            Err(ZipfError::EmptySelection)
        ));
    }

    #[test]
    fn renders_decodable_png() {
        let chart = BarChart::from_occurrences(&words()).unwrap();
        let png = chart.render_png().unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
        assert_eq!(decoded.height(), 1024);
        assert_eq!(decoded, chart.draw().unwrap());
    }

    #[test]
    fn tallest_bar_reaches_top_of_plot() {
        let chart = BarChart::from_occurrences(&words()).unwrap();
        let layout = chart.layout().unwrap();
        let image = chart.draw().unwrap();
        assert_eq!((layout.bar_width, layout.bar_spacing), (chart.bar_width, chart.bar_spacing));
        let first_bar_center = layout.plot_left + layout.bar_spacing + layout.bar_width / 2;
        let second_bar_center = first_bar_center + layout.bar_width + layout.bar_spacing;

        assert_eq!(*image.get_pixel(first_bar_center, layout.plot_top + 1), BAR_COLOR);
        assert_eq!(*image.get_pixel(first_bar_center, layout.plot_bottom - 1), BAR_COLOR);
        // two thirds as tall, so the top of its slot is empty
        assert_ne!(*image.get_pixel(second_bar_center, layout.plot_top + 1), BAR_COLOR);
        assert_eq!(*image.get_pixel(second_bar_center, layout.plot_bottom - 1), BAR_COLOR);
    }

    #[test]
    fn width_grows_with_bar_count() {
        let few = BarChart::from_occurrences(&words()).unwrap().draw().unwrap();
        let many: Vec<WordOccurrence> = (0..20)
            .map(|i| WordOccurrence::new(format!("w{i}"), 20 - i))
            .collect();
        let many = BarChart::from_occurrences(&many).unwrap().draw().unwrap();
        assert!(many.width() > few.width());
    }

    #[test]
    fn rejects_degenerate_value_range() {
        let mut chart = BarChart::from_occurrences(&words()).unwrap();
        chart.y_max = 0.0;
        assert!(matches!(chart.draw(), Err(ZipfError::Chart(_))));
    }

    fn ranked_words(n: u64) -> Vec<WordOccurrence> {
        (0..n).map(|i| WordOccurrence::new(format!("w{i}"), n - i)).collect()
    }

    #[test]
    fn narrows_bars_to_fit_wide_selections() {
        let mut chart = BarChart::from_occurrences(&ranked_words(5_000)).unwrap();
        chart.height = 200;
        let layout = chart.layout().unwrap();
        assert!(layout.bar_width >= 1 && layout.bar_width < chart.bar_width);
        assert!(layout.bar_spacing < chart.bar_spacing);
        assert!(layout.width as u64 <= MAX_WIDTH);

        let image = chart.draw().unwrap();
        assert_eq!(image.width(), layout.width);
        let first_bar_x = layout.plot_left + layout.bar_spacing;
        assert_eq!(*image.get_pixel(first_bar_x, layout.plot_top + 1), BAR_COLOR);
    }

    #[test]
    fn refuses_more_bars_than_pixels() {
        let chart = BarChart::from_occurrences(&ranked_words(MAX_WIDTH)).unwrap();
        assert!(matches!(chart.layout(), Err(ZipfError::Chart(_))));
    }

    #[test]
    fn tick_labels_drop_zero_fraction() {
        assert_eq!(format_tick(3.0), "3");
        assert_eq!(format_tick(1.5), "1.5");
    }
}
