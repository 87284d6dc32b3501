use serde_json::{json, Value};

pub const WHITE: [u8; 4] = [255, 255, 255, 255];
pub const BLACK: [u8; 4] = [0, 0, 0, 255];
pub const RED: [u8; 4] = [255, 0, 0, 255];
pub const BLUE: [u8; 4] = [0, 0, 255, 255];

/// A schema with a white card of the given size and `root` as its only element.
pub fn schema_with_root(width: u32, height: u32, root: Value) -> Value {
    json!({
        "name": "test",
        "width": width,
        "height": height,
        "background": "white",
        "text": { "font": "body", "font_size": 10, "fill": "black" },
        "root": root
    })
}

/// A full-card container holding `children`.
pub fn card_with_children(width: u32, height: u32, children: Value) -> Value {
    schema_with_root(
        width,
        height,
        json!({ "type": "container", "size": [1, 1], "children": children }),
    )
}

/// A small monster card: header bar, name, cost badge, artwork and repeated pips.
pub fn monster_card() -> Value {
    json!({
        "name": "monsters",
        "width": 200,
        "height": 280,
        "background": "#f0e6d2",
        "text": { "font": "body", "font_size": 16, "fill": "#202020" },
        "output": "{{set}}/{{name}}.png",
        "root": {
            "type": "container",
            "size": [1, 1],
            "children": [
                { "type": "shape", "shape": "rect", "size": [1, 40], "fill": "#303060" },
                { "type": "text", "offset": [10, 0], "size": [0.7, 40],
                  "alignment": "top-left", "text_alignment": "middle-left",
                  "content": "{{name}}", "fill": "white" },
                { "type": "shape", "shape": "circle", "alignment": "top-right",
                  "offset": [-6, 6], "size": [28, 28], "fill": "red",
                  "outline": "black", "outline_width": 2,
                  "children": [
                      { "type": "text", "size": [1, 1], "alignment": "middle",
                        "content": "{{cost}}", "fill": "white", "font_size": 14 }
                  ] },
                { "type": "image", "offset": [0, 50], "alignment": "top-center",
                  "size": [180, 120], "src": "art/{{art}}", "fit": "cover", "optional": true },
                { "type": "container", "offset": [10, -10], "alignment": "bottom-left",
                  "size": [16, 16], "show_if": "power",
                  "repeat": { "count": "power", "step": [20, 0] },
                  "children": [
                      { "type": "shape", "shape": "ellipse", "size": [1, 1], "fill": "blue" }
                  ] }
            ]
        }
    })
}

pub fn monster_entries() -> Vec<Value> {
    vec![
        json!({ "set": "core", "name": "Goblin", "cost": 1, "art": "goblin.png", "power": 2 }),
        json!({ "set": "core", "name": "Troll", "cost": 5, "art": "troll.png", "power": 0 }),
        json!({ "set": "promo", "name": "Dragon", "cost": 9, "art": "dragon.png", "power": 4 }),
    ]
}
