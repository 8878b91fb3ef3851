//! Integration tests for recorded streams
//!
//! Tests the CLI-facing path: text lines → FrameReader → MorseDecoder →
//! saved message, plus config files.

use blinkmorse::core::{
    decode_stream, format_sample, load_message, save_message, synthesize, FrameReader,
    MorseDecoder, SynthConfig,
};
use blinkmorse::types::{DecoderConfig, DecoderEvent, ErrorReason, FlushPolicy, FrameInput};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("blinkmorse_it_{}_{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn decode_lines(input: &str, config: DecoderConfig) -> String {
    let mut decoder = MorseDecoder::with_config(config);
    for frame in FrameReader::new(input.as_bytes()) {
        decoder.process(frame.unwrap());
    }
    decoder.finish();
    decoder.message().to_string()
}

/// Eye landmarks as JSON for a given lid opening (EAR = opening / width)
fn eye_json(cx: f64, opening: f64) -> String {
    let w = 0.1;
    let pts = [
        [cx - w / 2.0, 0.4],
        [cx - w / 6.0, 0.4 - opening * w / 2.0],
        [cx + w / 6.0, 0.4 - opening * w / 2.0],
        [cx + w / 2.0, 0.4],
        [cx + w / 6.0, 0.4 + opening * w / 2.0],
        [cx - w / 6.0, 0.4 + opening * w / 2.0],
    ];
    serde_json::to_string(&pts).unwrap()
}

#[test]
fn test_synthetic_stream_through_reader() {
    let samples = synthesize("CQ CQ", &SynthConfig::default()).unwrap();
    let input: String = samples.iter().map(|s| format_sample(s) + "\n").collect();
    assert_eq!(decode_lines(&input, DecoderConfig::default()).trim_end(), "CQ CQ");
}

#[test]
fn test_plain_text_stream() {
    let samples = synthesize("OK", &SynthConfig::default()).unwrap();
    let mut input = String::from("# t ear\n");
    for s in &samples {
        input.push_str(&format!("{:.4} {:.3}\n", s.timestamp, s.value));
    }
    assert_eq!(decode_lines(&input, DecoderConfig::default()), "OK");
}

#[test]
fn test_landmark_stream() {
    // square frame: EAR equals the lid opening ratio
    let open = format!("{{\"left\":{},\"right\":{}", eye_json(0.35, 0.3), eye_json(0.65, 0.3));
    let closed = format!("{{\"left\":{},\"right\":{}", eye_json(0.35, 0.05), eye_json(0.65, 0.05));

    let mut input = String::new();
    let mut frame = 0;
    // dash (0.5s), gap, dot (0.1s), then silence: "-." = N
    for (body, count) in [(&open, 10), (&closed, 15), (&open, 9), (&closed, 3), (&open, 45)] {
        for _ in 0..count {
            input.push_str(&format!(
                "{},\"t\":{},\"width\":720,\"height\":720}}\n",
                body,
                frame as f64 / 30.0
            ));
            frame += 1;
        }
    }
    assert_eq!(decode_lines(&input, DecoderConfig::default()), "N");
}

#[test]
fn test_no_face_lines_are_skipped() {
    let samples = synthesize("E", &SynthConfig::default()).unwrap();
    let mut input = String::new();
    for s in &samples {
        input.push_str(&format_sample(s));
        input.push('\n');
        input.push_str(&format!("{{\"t\":{:.4},\"face\":null}}\n", s.timestamp + 0.01));
    }

    let mut decoder = MorseDecoder::new();
    let mut no_face = 0;
    for frame in FrameReader::new(input.as_bytes()) {
        let frame = frame.unwrap();
        if matches!(frame, FrameInput::NoFace { .. }) {
            no_face += 1;
        }
        decoder.process(frame);
    }
    assert_eq!(no_face, samples.len());
    assert_eq!(decoder.stats().skipped_frames as usize, samples.len());
    assert_eq!(decoder.message(), "E");
}

#[test]
fn test_truncated_stream_flush() {
    // Cut the stream right after the last blink of "A"
    let samples = synthesize("A", &SynthConfig::default()).unwrap();
    let last_closed = samples
        .iter()
        .rposition(|s| s.value < 0.23)
        .unwrap();
    let input: String = samples[..=last_closed + 2]
        .iter()
        .map(|s| format_sample(s) + "\n")
        .collect();

    assert_eq!(decode_lines(&input, DecoderConfig::default()), "");
    let resolve = DecoderConfig {
        flush: FlushPolicy::Resolve,
        ..DecoderConfig::default()
    };
    assert_eq!(decode_lines(&input, resolve), "A");
}

#[test]
fn test_malformed_line_stops_with_line_number() {
    let input = "0.0 0.3\n0.1 0.3\n0.2 zero\n";
    let results: Vec<_> = FrameReader::new(input.as_bytes()).collect();
    assert_eq!(results.len(), 3);
    let err = results[2].as_ref().unwrap_err();
    assert_eq!(err.reason, ErrorReason::E102_STREAM_PARSE);
    assert_eq!(err.line, Some(3));
}

#[test]
fn test_config_file_roundtrip() {
    let dir = temp_dir("config");
    let path = dir.join("decoder.json");
    std::fs::write(&path, r#"{"dot_dash_threshold": 0.35, "flush": "resolve"}"#).unwrap();

    let config = DecoderConfig::load(&path).unwrap();
    assert_eq!(config.dot_dash_threshold, 0.35);
    assert_eq!(config.blink_threshold, 0.23);
    assert_eq!(config.flush, FlushPolicy::Resolve);
}

#[test]
fn test_config_file_errors() {
    let dir = temp_dir("config_err");

    let missing = DecoderConfig::load(dir.join("nope.json")).unwrap_err();
    assert_eq!(missing.reason, ErrorReason::E001_CONFIG_READ);

    let bad_json = dir.join("bad.json");
    std::fs::write(&bad_json, "{ nope").unwrap();
    assert_eq!(
        DecoderConfig::load(&bad_json).unwrap_err().reason,
        ErrorReason::E002_CONFIG_PARSE
    );

    let invalid = dir.join("invalid.json");
    std::fs::write(&invalid, r#"{"letter_break_secs": 3.0, "word_break_secs": 2.0}"#).unwrap();
    assert_eq!(
        DecoderConfig::load(&invalid).unwrap_err().reason,
        ErrorReason::E003_CONFIG_INVALID
    );
}

#[test]
fn test_decode_and_save() {
    let dir = temp_dir("save");
    let path = dir.join("decoded_message.txt");
    std::fs::write(&path, "OLD CONTENT THAT IS LONGER").unwrap();

    let samples = synthesize("HI THERE", &SynthConfig::default()).unwrap();
    let input: String = samples.iter().map(|s| format_sample(s) + "\n").collect();
    let message = decode_lines(&input, DecoderConfig::default());

    save_message(&message, &path).unwrap();
    assert_eq!(load_message(&path).unwrap(), "HI THERE");
}

#[test]
fn test_bad_trailing_line_still_saves_message() {
    let dir = temp_dir("bad_tail");
    let path = dir.join("decoded_message.txt");

    let samples = synthesize("SOS", &SynthConfig::default()).unwrap();
    let mut input: String = samples.iter().map(|s| format_sample(s) + "\n").collect();
    input.push_str("garbage line\n");

    let mut decoder = MorseDecoder::new();
    let end = decode_stream(&mut decoder, input.as_bytes(), |_| {});

    let err = end.error.expect("bad line is reported");
    assert_eq!(err.reason, ErrorReason::E102_STREAM_PARSE);
    assert_eq!(err.line, Some(samples.len() + 1));
    assert_eq!(decoder.message(), "SOS");

    save_message(decoder.message(), &path).unwrap();
    assert_eq!(load_message(&path).unwrap(), "SOS");
}

#[test]
fn test_overflowing_timestamp_stops_before_decoding() {
    // one dot, then a corrupt line whose time would look like endless silence
    let input = "0.0 0.3\n0.1 0.1\n0.2 0.3\n1e999 0.3\n";
    let mut decoder = MorseDecoder::new();
    let end = decode_stream(&mut decoder, input.as_bytes(), |_| {});

    assert_eq!(end.error.unwrap().line, Some(4));
    assert_eq!(decoder.message(), "");
    assert_eq!(end.output.events, vec![DecoderEvent::SequenceDropped { sequence: ".".into() }]);
}
