//! # Metric Extractor / 指标提取器
//!
//! Turns an unstructured captured text blob into a single numeric metric.
//! Captures routinely contain log lines or tracebacks around the metric, so
//! this is a tolerant substring scan rather than a JSON parser.
//!
//! 将非结构化的捕获文本转换为单个数值指标。
//! 捕获内容中指标前后经常夹杂日志或异常堆栈，因此这里采用容错的子串扫描，而不是 JSON 解析。

use std::fs;
use std::path::Path;

/// The key every benchmark implementation reports its result under.
pub const METRIC_KEY: &str = "median_ops_per_sec";

/// Characters skipped between the separator and the number.
const NOISE: &[char] = &[' ', '\t', '"', '\'', ','];

/// Scans text for the first occurrence of a quoted key and parses the number
/// that follows its separator.
///
/// 在文本中查找带引号键名的第一次出现，并解析其分隔符后面的数字。
#[derive(Debug, Clone)]
pub struct MetricExtractor {
    double_quoted: String,
    single_quoted: String,
}

impl MetricExtractor {
    pub fn new(key: &str) -> Self {
        Self {
            double_quoted: format!("\"{key}\""),
            single_quoted: format!("'{key}'"),
        }
    }

    /// Extracts the metric from a text blob.
    ///
    /// The scan is line by line. On each line the double-quoted key form is
    /// looked for first, then the single-quoted one. A located key must be
    /// followed by a `:` somewhere on the same line, otherwise the scan moves on
    /// to the next line. The first located key with a separator decides the
    /// result: later occurrences are never consulted.
    ///
    /// Returns `None` when the key never occurs with a separator, or when the
    /// token after it is not a non-negative number.
    pub fn extract(&self, text: &str) -> Option<f64> {
        for line in text.lines() {
            let Some(pos) = line
                .find(&self.double_quoted)
                .or_else(|| line.find(&self.single_quoted))
            else {
                continue;
            };

            let Some(colon) = line[pos..].find(':') else {
                continue;
            };

            let token = line[pos + colon + 1..].trim_start_matches(NOISE);
            return parse_leading_float(token).filter(|v| !v.is_nan() && *v >= 0.0);
        }
        None
    }

    /// Reads a capture destination and extracts the metric from it. An
    /// unreadable or missing file yields `None`, exactly like a missing key.
    ///
    /// 读取捕获文件并提取指标。文件缺失或不可读时与键不存在一样返回 `None`。
    pub fn extract_file(&self, path: &Path) -> Option<f64> {
        let bytes = fs::read(path).ok()?;
        self.extract(&String::from_utf8_lossy(&bytes))
    }
}

impl Default for MetricExtractor {
    fn default() -> Self {
        Self::new(METRIC_KEY)
    }
}

/// Extracts the `median_ops_per_sec` metric from a text blob.
pub fn extract(text: &str) -> Option<f64> {
    MetricExtractor::default().extract(text)
}

/// Extracts the `median_ops_per_sec` metric from a capture file.
pub fn extract_file(path: &Path) -> Option<f64> {
    MetricExtractor::default().extract_file(path)
}

/// Parses the longest prefix of `s` that forms a decimal floating point
/// literal, ignoring whatever trails it. Parsing is locale independent.
///
/// 解析 `s` 中构成十进制浮点字面量的最长前缀，忽略其后的内容。解析与区域设置无关。
fn parse_leading_float(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    // Special values as emitted by JSON encoders (`Infinity`, `NaN`) or printf (`inf`).
    let rest = &s[end..];
    for special in ["infinity", "inf", "nan"] {
        if rest
            .get(..special.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(special))
        {
            return s[..end + special.len()].parse::<f64>().ok();
        }
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        // A dangling exponent marker is not part of the number.
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
