use crate::domain::model::TextRecord;
use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;
use std::io::Read;

/// 讀檔時視為缺值的字串，比對時區分大小寫
const MISSING_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// 從 CSV 讀進來的表格，保留原始字串以便輸出時原樣寫回
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// 欄位推斷出的型別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Boolean,
    Integer,
    Float,
    Text,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width.max(row.len()), String::new());
                row
            })
            .collect();
        Self { headers, rows }
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(String::from).collect();

        if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
            return Err(EtlError::ProcessingError {
                message: "CSV input has no header row".to_string(),
            });
        }
        let headers = dedup_headers(headers);

        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            rows.push(record.iter().map(|field| field.to_string()).collect());
        }

        tracing::debug!("Parsed CSV with {} columns and {} rows", headers.len(), rows.len());
        Ok(Self::new(headers, rows))
    }

    pub fn from_csv_bytes(data: &[u8]) -> Result<Self> {
        Self::from_csv_reader(data)
    }

    pub fn columns(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| EtlError::MissingColumnError {
                column: name.to_string(),
                available: self.headers.clone(),
            })
    }

    fn raw_column(&self, index: usize) -> impl Iterator<Item = &str> + Clone + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// 依整欄內容推斷型別，規則與一般表格讀取器相同
    pub fn column_kind(&self, name: &str) -> Result<ColumnKind> {
        let index = self.column_index(name)?;
        Ok(infer_kind(self.raw_column(index)))
    }

    /// 取出指定欄位並轉成待分析的輸入值，欄位不存在時回傳設定錯誤
    pub fn column(&self, name: &str) -> Result<Vec<TextRecord>> {
        let index = self.column_index(name)?;
        let kind = infer_kind(self.raw_column(index));
        tracing::debug!("Column '{}' inferred as {:?}", name, kind);

        Ok(self
            .raw_column(index)
            .map(|cell| to_record(cell, kind))
            .collect())
    }
}

/// 重複的欄名依序改成 `name.1`、`name.2`，第一個保留原名
fn dedup_headers(headers: Vec<String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut renamed = Vec::with_capacity(headers.len());

    for header in headers {
        let mut name = header.clone();
        let mut suffix = 1;
        while seen.contains(&name) {
            name = format!("{}.{}", header, suffix);
            suffix += 1;
        }
        if name != header {
            tracing::debug!("Duplicate column '{}' renamed to '{}'", header, name);
        }
        seen.insert(name.clone());
        renamed.push(name);
    }
    renamed
}

fn is_missing(cell: &str) -> bool {
    cell.trim().is_empty() || MISSING_TOKENS.contains(&cell)
}

fn parse_bool(cell: &str) -> Option<bool> {
    match cell.trim().to_ascii_lowercase().as_str() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn parse_float(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    match trimmed.to_ascii_lowercase().as_str() {
        "nan" => Some(f64::NAN),
        "inf" | "+inf" | "infinity" => Some(f64::INFINITY),
        "-inf" | "-infinity" => Some(f64::NEG_INFINITY),
        _ => trimmed.parse::<f64>().ok(),
    }
}

fn infer_kind<'a>(cells: impl Iterator<Item = &'a str> + Clone) -> ColumnKind {
    let mut present = cells.clone().filter(|c| !is_missing(c)).peekable();
    if present.peek().is_none() {
        // 整欄空白視為缺值的浮點欄
        return ColumnKind::Float;
    }

    if present.clone().all(|c| parse_bool(c).is_some()) {
        return ColumnKind::Boolean;
    }

    let has_missing = cells.clone().any(is_missing);
    if !has_missing && cells.clone().all(|c| c.trim().parse::<i64>().is_ok()) {
        return ColumnKind::Integer;
    }

    if present.all(|c| parse_float(c).is_some()) {
        return ColumnKind::Float;
    }

    ColumnKind::Text
}

fn to_record(cell: &str, kind: ColumnKind) -> TextRecord {
    if is_missing(cell) {
        return TextRecord::Number(f64::NAN);
    }

    match kind {
        ColumnKind::Boolean => parse_bool(cell)
            .map(TextRecord::from)
            .unwrap_or(TextRecord::Other(serde_json::Value::Null)),
        ColumnKind::Integer => cell
            .trim()
            .parse::<i64>()
            .map(TextRecord::from)
            .unwrap_or_else(|_| TextRecord::Text(cell.to_string())),
        ColumnKind::Float => TextRecord::Number(parse_float(cell).unwrap_or(f64::NAN)),
        ColumnKind::Text => TextRecord::Text(cell.to_string()),
    }
}
