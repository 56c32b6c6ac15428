//! Renderer and attribute-diff properties exercised through the public API.

use minitel_core::attributes::{Color, TextAttributes, ZoneAttributes};
use minitel_core::videotex::{VideotexPage, COLUMNS, ROWS};
use minitel_core::VisualizationModule;
use proptest::prelude::*;

fn color() -> impl Strategy<Value = Color> {
    (0usize..8).prop_map(|i| Color::ALL[i])
}

fn text_attributes() -> impl Strategy<Value = TextAttributes> {
    (color(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(color, blinking, inverted, double_height, double_width)| TextAttributes {
            color,
            blinking,
            inverted,
            double_height,
            double_width,
        },
    )
}

fn zone_attributes() -> impl Strategy<Value = ZoneAttributes> {
    (color(), any::<bool>(), any::<bool>()).prop_map(|(background, masking, highlight)| {
        ZoneAttributes {
            background,
            masking,
            highlight,
        }
    })
}

/// A page with a few text runs and boxes at random positions.
fn page() -> impl Strategy<Value = VideotexPage> {
    let text = (1..=ROWS, 1..=COLUMNS, "[a-zA-Z0-9 éà]{1,12}", text_attributes());
    let boxes = (1..=ROWS, 1..=COLUMNS, 1usize..4, 1usize..6, zone_attributes());
    (
        proptest::collection::vec(text, 0..6),
        proptest::collection::vec(boxes, 0..3),
    )
        .prop_map(|(texts, boxes)| {
            let mut page = VideotexPage::new();
            for (row, col, height, width, zone) in boxes {
                // Out-of-range boxes are rejected and leave the page as is.
                let _ = page.draw_box(row, col, height, width, zone);
            }
            for (row, col, text, attributes) in texts {
                page.set_text(&text, row, col, Some(attributes))
                    .expect("row and col are in range");
            }
            page
        })
}

#[test]
fn test_blank_grid_renders_to_nothing() {
    for vm in VisualizationModule::ALL {
        assert!(VideotexPage::new().render(vm).is_empty());
    }
}

#[test]
fn test_single_cell_example() {
    // Arrange
    let mut page = VideotexPage::new();
    page.set_text("A", 12, 5, None).unwrap();

    // Act
    let bytes = page.render(VisualizationModule::Vgp2);

    // Assert: CSI 1 2 ; 5 H, then 'A'
    assert_eq!(bytes, vec![0x1B, 0x5B, b'1', b'2', b';', b'5', b'H', 0x41]);
}

proptest! {
    #[test]
    fn prop_text_diff_of_equal_states_is_empty(a in text_attributes()) {
        prop_assert!(a.diff(&a).is_empty());
    }

    #[test]
    fn prop_zone_diff_of_equal_states_is_empty(a in zone_attributes()) {
        prop_assert!(a.diff(&a).is_empty());
    }

    #[test]
    fn prop_text_diff_has_one_escape_per_changed_group(a in text_attributes(), b in text_attributes()) {
        let groups = [
            a.color != b.color,
            a.blinking != b.blinking,
            a.inverted != b.inverted,
            (a.double_height, a.double_width) != (b.double_height, b.double_width),
        ];
        let changed = groups.iter().filter(|g| **g).count();
        prop_assert_eq!(a.diff(&b).len(), changed * 2);
    }

    #[test]
    fn prop_zone_diff_ends_with_delimiter_when_not_empty(a in zone_attributes(), b in zone_attributes()) {
        let diff = a.diff(&b);
        prop_assert_eq!(diff.is_empty(), a == b);
        if !diff.is_empty() {
            prop_assert_eq!(diff.last(), Some(&0x20));
        }
    }

    #[test]
    fn prop_render_is_deterministic(page in page()) {
        for vm in VisualizationModule::ALL {
            prop_assert_eq!(page.render(vm), page.clone().render(vm));
        }
    }
}
