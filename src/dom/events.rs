//! Browser events to `InputEvent`s. Positions become relative to the
//! viewer's client box, which is the frame the gesture engine works in.

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MouseEvent, PointerEvent, TouchEvent, TouchList, WheelEvent};
use crate::dom::surface::{media_id_of, MEDIA_ATTR};
use crate::engine::gesture::{InputEvent, PointerKind};
use crate::engine::pinch::TouchPoint;
use crate::types::{ClickFraction, MediaId, Point};

pub fn pointer_kind(pointer_type: &str) -> PointerKind {
    match pointer_type {
        "touch" => PointerKind::Touch,
        "pen" => PointerKind::Pen,
        _ => PointerKind::Mouse,
    }
}

/// The media element under the event target, if any.
pub fn media_target(event: &Event) -> Option<MediaId> {
    let el = event.target()?.dyn_into::<Element>().ok()?;
    let hit = el.closest(&format!("[{}]", MEDIA_ATTR)).ok().flatten()?;
    media_id_of(&hit)
}

/// Where inside the clicked media element (a thumbnail, usually) the click
/// landed, for opening the viewer at the same spot.
pub fn click_fraction(event: &MouseEvent) -> Option<ClickFraction> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    let el = target.closest(&format!("[{}]", MEDIA_ATTR)).ok().flatten().unwrap_or(target);
    let r = el.get_bounding_client_rect();
    ClickFraction::from_click(r.left(), r.top(), r.width(), r.height(), event.client_x() as f64, event.client_y() as f64)
}

fn local(viewer: &Element, client_x: f64, client_y: f64) -> Point {
    let rect = viewer.get_bounding_client_rect();
    Point::new(
        client_x - rect.left() - viewer.client_left() as f64,
        client_y - rect.top() - viewer.client_top() as f64,
    )
}

fn touch_points(list: &TouchList, viewer: &Element) -> Vec<TouchPoint> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| TouchPoint {
            id: t.identifier(),
            position: local(viewer, t.client_x() as f64, t.client_y() as f64),
        })
        .collect()
}

/// Translate a pointer event by its DOM type name.
pub fn pointer_input(event: &PointerEvent, viewer: &Element) -> Option<InputEvent> {
    let pointer_id = event.pointer_id();
    let kind = pointer_kind(&event.pointer_type());
    let input = match event.type_().as_str() {
        "pointerdown" => InputEvent::PointerDown {
            pointer_id,
            kind,
            button: event.button(),
            position: local(viewer, event.client_x() as f64, event.client_y() as f64),
            target: media_target(event),
        },
        "pointermove" => InputEvent::PointerMove {
            pointer_id,
            position: local(viewer, event.client_x() as f64, event.client_y() as f64),
        },
        "pointerup" => InputEvent::PointerUp { pointer_id, kind },
        "pointercancel" => InputEvent::PointerCancel { pointer_id },
        other => {
            log::debug!("events: ignoring pointer event {other}");
            return None;
        }
    };
    Some(input)
}

pub fn touch_input(event: &TouchEvent, viewer: &Element) -> Option<InputEvent> {
    let touches = touch_points(&event.touches(), viewer);
    let input = match event.type_().as_str() {
        "touchstart" => InputEvent::TouchStart { touches, target: media_target(event) },
        "touchmove" => InputEvent::TouchMove { touches },
        "touchend" | "touchcancel" => InputEvent::TouchEnd { touches },
        other => {
            log::debug!("events: ignoring touch event {other}");
            return None;
        }
    };
    Some(input)
}

pub fn wheel_input(event: &WheelEvent, viewer: &Element) -> InputEvent {
    InputEvent::Wheel {
        position: local(viewer, event.client_x() as f64, event.client_y() as f64),
        delta_y: event.delta_y(),
        ctrl_key: event.ctrl_key(),
        target: media_target(event),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_kind() {
        assert_eq!(pointer_kind("touch"), PointerKind::Touch);
        assert_eq!(pointer_kind("pen"), PointerKind::Pen);
        assert_eq!(pointer_kind("mouse"), PointerKind::Mouse);
        // Unknown or empty pointer types behave like a mouse
        assert_eq!(pointer_kind(""), PointerKind::Mouse);
    }
}
