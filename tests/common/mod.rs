#![allow(dead_code)]

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use plate_reader::{LprError, TextRecognizer};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const INK: Rgb<u8> = Rgb([15, 15, 15]);
const PAPER: Rgb<u8> = Rgb([250, 250, 250]);

/// White photo with a framed plate holding three glyph-like bars
pub fn plate_photo() -> RgbImage {
    let mut img = RgbImage::from_pixel(240, 160, PAPER);
    // Plate frame, 6px thick
    draw_filled_rect_mut(&mut img, Rect::at(40, 50).of_size(160, 60), INK);
    draw_filled_rect_mut(&mut img, Rect::at(46, 56).of_size(148, 48), PAPER);
    // Glyphs
    for i in 0..3 {
        draw_filled_rect_mut(&mut img, Rect::at(70 + i * 35, 66).of_size(8, 28), INK);
    }
    img
}

pub fn blank_photo() -> RgbImage {
    RgbImage::from_pixel(200, 100, Rgb([255, 255, 255]))
}

/// Save `img` as PNG under `dir` and return its path
pub fn save_photo(dir: &Path, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    img.save(&path).expect("Failed to write test photo");
    path
}

/// Files in `dir`, sorted by name
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("Failed to list directory")
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Recognizer that replays scripted answers and records every call
pub struct ScriptedRecognizer {
    answers: Mutex<VecDeque<Result<String, String>>>,
    calls: Mutex<Vec<(PathBuf, String)>>,
}

impl ScriptedRecognizer {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: Mutex::new(answers.into_iter().map(|s| Ok(s.into())).collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            answers: Mutex::new(VecDeque::from(vec![Err(message.to_string())])),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(PathBuf, String)> {
        self.calls.lock().unwrap().clone()
    }
}

impl TextRecognizer for ScriptedRecognizer {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn description(&self) -> &'static str {
        "replays canned OCR output"
    }

    fn read_text(&self, path: &Path, engine_config: &str) -> Result<String, LprError> {
        assert!(path.is_file(), "crop must be persisted before OCR: {:?}", path);
        self.calls
            .lock()
            .unwrap()
            .push((path.to_path_buf(), engine_config.to_string()));
        match self.answers.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(LprError::OcrEngineError(message)),
            // Out of script: nothing readable
            None => Ok(String::new()),
        }
    }
}

/// Font used to render plate text, overridable with LPR_TEST_FONT
pub fn load_font() -> ab_glyph::FontVec {
    let path = std::env::var("LPR_TEST_FONT")
        .unwrap_or_else(|_| "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf".to_string());
    let data = std::fs::read(&path).unwrap_or_else(|e| panic!("Failed to read font {}: {}", path, e));
    ab_glyph::FontVec::try_from_vec(data).expect("Failed to parse font")
}

/// White photo with a framed plate reading `text`
pub fn rendered_plate_photo(text: &str) -> RgbImage {
    let font = load_font();
    let mut img = RgbImage::from_pixel(480, 240, PAPER);
    draw_filled_rect_mut(&mut img, Rect::at(60, 70).of_size(360, 100), INK);
    draw_filled_rect_mut(&mut img, Rect::at(68, 78).of_size(344, 84), PAPER);
    imageproc::drawing::draw_text_mut(&mut img, INK, 100, 88, 64.0, &font, text);
    img
}
