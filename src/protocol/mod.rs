use std::path::PathBuf;

use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::context::AppContext;
use crate::model::language::Language;

mod canvas;
mod command;
use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

fn required_str<'a>(payload: &'a Value, key: &str) -> Result<&'a str, String> {
    payload
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("payload.{key} is required"))
}

fn required_path(payload: &Value) -> Result<PathBuf, String> {
    let p = required_str(payload, "path")?;
    if p.trim().is_empty() {
        return Err("payload.path is required".into());
    }
    Ok(PathBuf::from(p))
}

/// Handles one request line and returns the response line.
pub fn handle(ctx: &mut AppContext, input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let cmd_str = get_cmd(&req);
    let payload = get_payload(&req);
    let cmd = Command::from(cmd_str);

    debug!(cmd = cmd_str, "request");

    let result = match cmd {
        Command::Ping => Ok(json!({ "message": "lingo-core alive" })),
        Command::Translate => translate(ctx, payload),
        Command::PhraseLookup
        | Command::PhraseAdd
        | Command::PhraseImport
        | Command::PhraseExport => phrases(ctx, cmd, payload),
        Command::HistoryList
        | Command::HistoryClear
        | Command::HistoryImport
        | Command::HistoryExport => history(ctx, cmd, payload),
        Command::CanvasMove
        | Command::CanvasRelease
        | Command::CanvasPen
        | Command::CanvasNew
        | Command::CanvasOpen
        | Command::CanvasSave => canvas::handle(&mut ctx.canvas, cmd, payload),
        Command::AppClose => {
            if ctx.close() {
                Ok(json!({ "saved": true }))
            } else {
                Err("failed to save state".to_string())
            }
        }
        Command::Unknown => Err("unknown command".to_string()),
    };

    match result {
        Ok(payload) => ok(id, payload),
        Err(message) => err(id, message),
    }
}

fn translate(ctx: &mut AppContext, payload: &Value) -> Result<Value, String> {
    let text = payload.get("text").and_then(|v| v.as_str()).unwrap_or("");
    let target = required_str(payload, "target")?;
    let target = Language::from_code(target)
        .ok_or_else(|| format!("unsupported target language: {target}"))?;

    let resolution = ctx
        .resolver
        .resolve(&ctx.phrases, text, target)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "translation failed".to_string())?;

    ctx.history
        .record(&resolution.text, &resolution.translation, resolution.source);
    let history_saved = match ctx.history.save() {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "failed to save history");
            false
        }
    };

    let mut reply = serde_json::to_value(&resolution).map_err(|e| e.to_string())?;
    reply["history_saved"] = json!(history_saved);
    Ok(reply)
}

fn phrases(ctx: &mut AppContext, cmd: Command, payload: &Value) -> Result<Value, String> {
    match cmd {
        Command::PhraseLookup => {
            let text = required_str(payload, "text")?;
            Ok(json!({ "translation": ctx.phrases.lookup(text) }))
        }

        Command::PhraseAdd => {
            let text = required_str(payload, "text")?;
            let translation = required_str(payload, "translation")?;
            ctx.phrases.insert(text, translation);
            ctx.phrases.save().map_err(|e| e.to_string())?;
            Ok(json!({ "count": ctx.phrases.len() }))
        }

        Command::PhraseImport => {
            let path = required_path(payload)?;
            let imported = ctx.phrases.import_file(&path).map_err(|e| e.to_string())?;
            Ok(json!({ "imported": imported, "count": ctx.phrases.len() }))
        }

        Command::PhraseExport => {
            let path = required_path(payload)?;
            ctx.phrases.export_file(&path).map_err(|e| e.to_string())?;
            Ok(json!({ "count": ctx.phrases.len() }))
        }

        _ => Err("unknown command".to_string()),
    }
}

fn history(ctx: &mut AppContext, cmd: Command, payload: &Value) -> Result<Value, String> {
    match cmd {
        Command::HistoryList => Ok(json!({ "entries": ctx.history.export_all() })),

        Command::HistoryClear => {
            ctx.history.clear();
            ctx.history.save().map_err(|e| e.to_string())?;
            Ok(json!({ "count": 0 }))
        }

        Command::HistoryImport => {
            let path = required_path(payload)?;
            let count = ctx.history.import_file(&path).map_err(|e| e.to_string())?;
            Ok(json!({ "count": count }))
        }

        Command::HistoryExport => {
            let path = required_path(payload)?;
            ctx.history.export_file(&path).map_err(|e| e.to_string())?;
            Ok(json!({ "count": ctx.history.len() }))
        }

        _ => Err("unknown command".to_string()),
    }
}
