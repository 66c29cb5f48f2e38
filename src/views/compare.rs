use crate::data_url::DataUrl;
use dioxus::prelude::*;
use std::rc::Rc;

const INITIAL_POSITION: f64 = 50.0;

/// Horizontal extent of the compare container in client pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f64,
    pub width: f64,
}

/// Pointer position as a percentage of `bounds`, clamped to 0..=100.
/// Degenerate bounds keep `current`.
pub fn slider_percent(pointer_x: f64, bounds: Bounds, current: f64) -> f64 {
    if bounds.width <= 0.0 || !pointer_x.is_finite() {
        return current;
    }
    ((pointer_x - bounds.left) / bounds.width * 100.0).clamp(0.0, 100.0)
}

/// CSS clip for the "before" layer so it covers `position` percent from the left.
pub fn before_clip_style(position: f64) -> String {
    format!("clip-path: inset(0 {:.2}% 0 0);", 100.0 - position.clamp(0.0, 100.0))
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderDrag {
    pub position: f64,
    pub dragging: bool,
}

impl Default for SliderDrag {
    fn default() -> Self {
        Self {
            position: INITIAL_POSITION,
            dragging: false,
        }
    }
}

impl SliderDrag {
    pub fn begin(&mut self, pointer_x: f64, bounds: Option<Bounds>) {
        self.dragging = true;
        self.track(pointer_x, bounds);
    }

    /// Follows the pointer only while a drag is active, wherever it is.
    pub fn track(&mut self, pointer_x: f64, bounds: Option<Bounds>) {
        if let (true, Some(bounds)) = (self.dragging, bounds) {
            self.position = slider_percent(pointer_x, bounds, self.position);
        }
    }

    /// A move with no button held means the release happened somewhere we
    /// never saw, such as outside the window.
    pub fn pointer_moved(&mut self, pointer_x: f64, bounds: Option<Bounds>, buttons_held: bool) {
        if buttons_held {
            self.track(pointer_x, bounds);
        } else {
            self.end();
        }
    }

    pub fn end(&mut self) {
        self.dragging = false;
    }
}

async fn measure(node: Option<Rc<MountedData>>) -> Option<Bounds> {
    let rect = node?.get_client_rect().await.ok()?;
    Some(Bounds {
        left: rect.origin.x,
        width: rect.size.width,
    })
}

#[component]
pub fn CompareView(before: DataUrl, after: DataUrl) -> Element {
    let mut drag = use_signal(SliderDrag::default);
    let mut container = use_signal(|| Option::<Rc<MountedData>>::None);
    let mut bounds = use_signal(|| Option::<Bounds>::None);

    let position = drag().position;
    let dragging = drag().dragging;
    let clip = before_clip_style(position);

    rsx! {
        div {
            class: "compare",
            onmounted: move |evt: MountedEvent| async move {
                let node = evt.data();
                container.set(Some(node.clone()));
                bounds.set(measure(Some(node)).await);
            },
            onpointerdown: move |evt: PointerEvent| {
                evt.prevent_default();
                let x = evt.client_coordinates().x;
                drag.with_mut(|d| d.begin(x, bounds()));
                spawn(async move {
                    if let Some(fresh) = measure(container()).await {
                        bounds.set(Some(fresh));
                        drag.with_mut(|d| d.track(x, Some(fresh)));
                    }
                });
            },
            img { class: "compare-after", src: "{after}", alt: "Redesigned room", draggable: "false" }
            img { class: "compare-before", style: "{clip}", src: "{before}", alt: "Original room", draggable: "false" }
            span { class: "compare-label left", "Before" }
            span { class: "compare-label right", "After" }
            div { class: "compare-handle", style: "left: {position}%;",
                div { class: "compare-grip", "⇔" }
            }
        }
        if dragging {
            // Full-viewport layer so the drag follows the pointer outside the image.
            div {
                class: "compare-capture",
                onpointermove: move |evt: PointerEvent| {
                    let x = evt.client_coordinates().x;
                    let held = !evt.held_buttons().is_empty();
                    drag.with_mut(|d| d.pointer_moved(x, bounds(), held));
                },
                onpointerup: move |_| drag.with_mut(|d| d.end()),
                onpointercancel: move |_| drag.with_mut(|d| d.end()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds {
        left: 100.0,
        width: 400.0,
    };

    #[test]
    fn percent_within_bounds() {
        assert_eq!(slider_percent(300.0, BOUNDS, 50.0), 50.0);
        assert_eq!(slider_percent(100.0, BOUNDS, 50.0), 0.0);
        assert_eq!(slider_percent(500.0, BOUNDS, 50.0), 100.0);
    }

    #[test]
    fn percent_clamps_outside_bounds() {
        assert_eq!(slider_percent(-40.0, BOUNDS, 50.0), 0.0);
        assert_eq!(slider_percent(2000.0, BOUNDS, 50.0), 100.0);
    }

    #[test]
    fn zero_width_keeps_position() {
        let empty = Bounds {
            left: 0.0,
            width: 0.0,
        };
        assert_eq!(slider_percent(10.0, empty, 42.0), 42.0);
    }

    #[test]
    fn drag_tracks_only_while_active() {
        let mut drag = SliderDrag::default();
        drag.track(200.0, Some(BOUNDS));
        assert_eq!(drag.position, INITIAL_POSITION);

        drag.begin(200.0, Some(BOUNDS));
        assert_eq!(drag.position, 25.0);
        drag.track(9000.0, Some(BOUNDS));
        assert_eq!(drag.position, 100.0);

        drag.end();
        drag.track(100.0, Some(BOUNDS));
        assert_eq!(drag.position, 100.0);
        assert!(!drag.dragging);
    }

    #[test]
    fn move_without_buttons_ends_drag() {
        let mut drag = SliderDrag::default();
        drag.begin(300.0, Some(BOUNDS));
        drag.pointer_moved(200.0, Some(BOUNDS), true);
        assert_eq!(drag.position, 25.0);

        drag.pointer_moved(500.0, Some(BOUNDS), false);
        assert!(!drag.dragging);
        assert_eq!(drag.position, 25.0);

        drag.pointer_moved(400.0, Some(BOUNDS), true);
        assert_eq!(drag.position, 25.0);
    }

    #[test]
    fn begin_without_bounds_keeps_position() {
        let mut drag = SliderDrag::default();
        drag.begin(10.0, None);
        assert!(drag.dragging);
        assert_eq!(drag.position, INITIAL_POSITION);
    }

    #[test]
    fn clip_covers_left_fraction() {
        assert_eq!(before_clip_style(25.0), "clip-path: inset(0 75.00% 0 0);");
        assert_eq!(before_clip_style(140.0), "clip-path: inset(0 0.00% 0 0);");
    }
}
