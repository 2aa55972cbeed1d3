use serde_json::{json, Value};

use super::command::Command;
use super::required_path;
use crate::model::pen::{Pen, Point, Rgb};
use crate::services::canvas::Canvas;

fn pen_json(pen: Pen) -> Value {
    json!({
        "color": pen.color.to_hex(),
        "width": pen.width
    })
}

pub fn handle(canvas: &mut Canvas, cmd: Command, payload: &Value) -> Result<Value, String> {
    match cmd {
        Command::CanvasMove => {
            let x = payload.get("x").and_then(|v| v.as_f64());
            let y = payload.get("y").and_then(|v| v.as_f64());
            let (Some(x), Some(y)) = (x, y) else {
                return Err("payload.x and payload.y are required".into());
            };

            let drawn = canvas.pointer_move(Point::from_pointer(x, y));
            Ok(json!({ "drawn": drawn }))
        }

        Command::CanvasRelease => {
            canvas.pointer_release();
            Ok(json!({}))
        }

        Command::CanvasPen => {
            if let Some(color) = payload.get("color").and_then(|v| v.as_str()) {
                let rgb = Rgb::from_hex(color).ok_or_else(|| format!("invalid color: {color}"))?;
                canvas.set_pen_color(rgb);
            }
            if let Some(width) = payload.get("width").and_then(|v| v.as_u64()) {
                canvas.set_pen_width(u32::try_from(width).unwrap_or(u32::MAX));
            }
            Ok(json!({ "pen": pen_json(canvas.pen()) }))
        }

        Command::CanvasNew => {
            canvas.new_image();
            let (w, h) = canvas.dimensions();
            Ok(json!({ "width": w, "height": h }))
        }

        Command::CanvasOpen => {
            let path = required_path(payload)?;
            canvas.open_png(&path).map_err(|e| e.to_string())?;
            Ok(json!({}))
        }

        Command::CanvasSave => {
            let path = required_path(payload)?;
            canvas.save_png(&path).map_err(|e| e.to_string())?;
            Ok(json!({}))
        }

        _ => Err("unknown command".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_release_sequence() {
        let mut c = Canvas::new(100, 100);

        let r = handle(&mut c, Command::CanvasMove, &json!({ "x": 10.7, "y": 10.2 })).unwrap();
        assert!(r["drawn"].is_null());

        let r = handle(&mut c, Command::CanvasMove, &json!({ "x": 40, "y": 10 })).unwrap();
        assert_eq!(r["drawn"]["from"], json!({ "x": 10, "y": 10 }));
        assert_eq!(r["drawn"]["to"], json!({ "x": 40, "y": 10 }));

        handle(&mut c, Command::CanvasRelease, &json!({})).unwrap();
        let r = handle(&mut c, Command::CanvasMove, &json!({ "x": 80, "y": 80 })).unwrap();
        assert!(r["drawn"].is_null());
    }

    #[test]
    fn test_pen_update() {
        let mut c = Canvas::new(10, 10);
        let r = handle(&mut c, Command::CanvasPen, &json!({ "color": "#336699", "width": 25 })).unwrap();
        assert_eq!(r["pen"], json!({ "color": "#336699", "width": 25 }));

        assert!(handle(&mut c, Command::CanvasPen, &json!({ "color": "blue" })).is_err());
        assert_eq!(c.pen().color, Rgb { r: 0x33, g: 0x66, b: 0x99 });
    }

    #[test]
    fn test_move_requires_coordinates() {
        let mut c = Canvas::new(10, 10);
        assert!(handle(&mut c, Command::CanvasMove, &json!({ "x": 1 })).is_err());
    }
}
