use artbox::{
    Alignment as ArtAlignment, Color as ArtColor, ColorStop, Fill, LinearGradient, Renderer,
    fonts, integrations::ratatui::ArtBox,
};
use ratatui::{Frame, layout::Rect};

use super::Component;
use crate::action::Action;
use crate::state::LOADING_ANIM_CYCLE_TICKS;

pub const TITLE: &str = "Weather Workshop";

/// FIGlet page title in indigo; the gradient pulses while a lookup is in flight
pub struct TitleHeader;

pub struct TitleHeaderProps {
    pub is_animating: bool,
    pub tick_count: u32,
}

fn indigo() -> ArtColor {
    ArtColor::rgb(79, 70, 229)
}

fn indigo_light() -> ArtColor {
    ArtColor::rgb(165, 180, 252)
}

/// Triangle wave over one animation cycle: 0 at the ends, 1 halfway.
fn pulse(tick_count: u32) -> f32 {
    let steps = LOADING_ANIM_CYCLE_TICKS.max(1);
    let t = (tick_count % steps) as f32 / steps as f32;
    1.0 - (2.0 * t - 1.0).abs()
}

fn title_fill(pulse: f32) -> Fill {
    let (dark, light) = (indigo(), indigo_light());
    let stops = vec![
        ColorStop::new(0.0, dark.interpolate(light, pulse)),
        ColorStop::new(1.0, light.interpolate(dark, pulse)),
    ];
    Fill::Linear(LinearGradient::new(5.0, stops))
}

impl Component<Action> for TitleHeader {
    type Props<'a> = TitleHeaderProps;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let amount = if props.is_animating {
            pulse(props.tick_count)
        } else {
            0.0
        };
        let fill = title_fill(amount);

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(fill);

        frame.render_widget(ArtBox::new(&renderer, TITLE), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tui_dispatch::testing::RenderHarness;

    #[test]
    fn test_pulse_peaks_mid_cycle() {
        assert_eq!(pulse(0), 0.0);
        assert_eq!(pulse(LOADING_ANIM_CYCLE_TICKS), 0.0);
        assert_eq!(pulse(LOADING_ANIM_CYCLE_TICKS / 2), 1.0);
        assert!(pulse(LOADING_ANIM_CYCLE_TICKS / 4) > 0.49);
    }

    #[test]
    fn test_title_renders_idle_and_animating() {
        let mut render = RenderHarness::new(100, 8);
        for is_animating in [false, true] {
            let output = render.render_to_string_plain(|frame| {
                TitleHeader.render(
                    frame,
                    frame.area(),
                    TitleHeaderProps {
                        is_animating,
                        tick_count: 7,
                    },
                );
            });
            assert!(!output.trim().is_empty());
        }
    }
}
