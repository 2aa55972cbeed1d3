#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Ping,
    Translate,
    PhraseLookup,
    PhraseAdd,
    PhraseImport,
    PhraseExport,
    HistoryList,
    HistoryClear,
    HistoryImport,
    HistoryExport,
    CanvasMove,
    CanvasRelease,
    CanvasPen,
    CanvasNew,
    CanvasOpen,
    CanvasSave,
    AppClose,
    Unknown,
}

impl From<&str> for Command {
    fn from(s: &str) -> Self {
        match s {
            "ping" => Command::Ping,
            "translate" => Command::Translate,
            "phrase.lookup" => Command::PhraseLookup,
            "phrase.add" => Command::PhraseAdd,
            "phrase.import" => Command::PhraseImport,
            "phrase.export" => Command::PhraseExport,
            "history.list" => Command::HistoryList,
            "history.clear" => Command::HistoryClear,
            "history.import" => Command::HistoryImport,
            "history.export" => Command::HistoryExport,
            "canvas.move" => Command::CanvasMove,
            "canvas.release" => Command::CanvasRelease,
            "canvas.pen" => Command::CanvasPen,
            "canvas.new" => Command::CanvasNew,
            "canvas.open" => Command::CanvasOpen,
            "canvas.save" => Command::CanvasSave,
            "app.close" => Command::AppClose,
            _ => Command::Unknown,
        }
    }
}
