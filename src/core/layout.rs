//! Size and anchoring rules for the dialog's button strip.

use super::geometry::{Point, Rect, Size};

/// Both buttons share the wider natural width so they look interchangeable.
pub fn equalized_button_size(stay: Size, evade: Size) -> Size {
    Size::new(stay.width.max(evade.width), stay.height.max(evade.height))
}

/// Smallest dialog that fits the message above the two buttons side by side.
pub fn minimum_size(message: Size, stay: Size, evade: Size, margin: i32) -> Size {
    Size::new(
        (message.width + margin * 2).max(stay.width + evade.width + margin * 4),
        message.height + stay.height.max(evade.height) + margin * 3,
    )
}

/// Height reserved below the message for the buttons.
pub fn button_strip_height(button: Size, margin: i32) -> i32 {
    button.height + margin * 2
}

/// Stay button in the bottom-right corner, evade button directly to its left.
pub fn anchor(dialog: Size, stay: Size, evade: Size, margin: i32) -> (Rect, Rect) {
    let stay_rect = Rect::new(
        Point::new(
            dialog.width - margin - stay.width,
            dialog.height - margin - stay.height,
        ),
        stay,
    );
    let evade_rect = Rect::new(
        Point::new(stay_rect.left() - margin - evade.width, stay_rect.top()),
        evade,
    );
    (stay_rect, evade_rect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchors_to_bottom_right() {
        let button = Size::new(80, 30);
        let (stay, evade) = anchor(Size::new(400, 200), button, button, 10);
        assert_eq!(stay.origin, Point::new(310, 160));
        assert_eq!(stay.right(), 390);
        assert_eq!(stay.bottom(), 190);
        assert_eq!(evade.origin, Point::new(220, 160));
        assert_eq!(evade.right() + 10, stay.left());
    }

    #[test]
    fn minimum_size_fits_message_or_buttons() {
        let button = Size::new(80, 30);
        let wide_message = Size::new(300, 40);
        assert_eq!(
            minimum_size(wide_message, button, button, 10),
            Size::new(320, 100)
        );

        let short_message = Size::new(50, 20);
        assert_eq!(
            minimum_size(short_message, button, button, 10),
            Size::new(200, 80)
        );
    }

    #[test]
    fn equalizes_to_widest_button() {
        let size = equalized_button_size(Size::new(40, 30), Size::new(72, 28));
        assert_eq!(size, Size::new(72, 30));
    }
}
