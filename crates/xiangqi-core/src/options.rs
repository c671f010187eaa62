//! エンジンオプション
//!
//! 駒価値など、評価テーブルの初期化時に読み込まれる調整値を集約する。
//! プロセス全体の可変グローバルは持たず、値を確定させた `EngineOptions` から
//! `EvalContext`（`crate::eval`）を構築して `Arc` で局面間に共有する。
//!
//! TOML から読み込む場合、省略した項目は既定値になる。
//!
//! ```toml
//! pawn_value_mg = 89
//! rook_value_eg = 2020
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// オプションの設定・読み込みエラー
#[derive(Debug, Error)]
pub enum OptionError {
    /// 未知のオプション名
    #[error("unknown option: {0}")]
    UnknownName(String),
    /// 整数として解釈できない値
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },
    /// 範囲外の値
    #[error("{name} must be in {min}..={max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
    /// TOML の構文・型エラー
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// 1つのオプション項目の定義
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// プロトコル上のオプション名
    pub name: &'static str,
    /// デフォルト値
    pub default: i32,
    /// 最小値（inclusive）
    pub min: i32,
    /// 最大値（inclusive）
    pub max: i32,
}

const OPTION_SPECS: &[OptionSpec] = &[
    OptionSpec { name: "PawnValueMg", default: 89, min: 50, max: 500 },
    OptionSpec { name: "PawnValueEg", default: 305, min: 50, max: 500 },
    OptionSpec { name: "BishopValueMg", default: 335, min: 200, max: 800 },
    OptionSpec { name: "BishopValueEg", default: 400, min: 200, max: 800 },
    OptionSpec { name: "AdvisorValueMg", default: 400, min: 200, max: 800 },
    OptionSpec { name: "AdvisorValueEg", default: 380, min: 200, max: 800 },
    OptionSpec { name: "KnightValueMg", default: 802, min: 500, max: 1500 },
    OptionSpec { name: "KnightValueEg", default: 865, min: 500, max: 1500 },
    OptionSpec { name: "CannonValueMg", default: 865, min: 500, max: 1500 },
    OptionSpec { name: "CannonValueEg", default: 842, min: 500, max: 1500 },
    OptionSpec { name: "RookValueMg", default: 1891, min: 1000, max: 2800 },
    OptionSpec { name: "RookValueEg", default: 2020, min: 1000, max: 2800 },
];

/// エンジンオプション
///
/// デフォルト値は `option_specs()` の既定値と一致させている。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineOptions {
    pub pawn_value_mg: i32,
    pub pawn_value_eg: i32,
    pub bishop_value_mg: i32,
    pub bishop_value_eg: i32,
    pub advisor_value_mg: i32,
    pub advisor_value_eg: i32,
    pub knight_value_mg: i32,
    pub knight_value_eg: i32,
    pub cannon_value_mg: i32,
    pub cannon_value_eg: i32,
    pub rook_value_mg: i32,
    pub rook_value_eg: i32,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            pawn_value_mg: 89,
            pawn_value_eg: 305,
            bishop_value_mg: 335,
            bishop_value_eg: 400,
            advisor_value_mg: 400,
            advisor_value_eg: 380,
            knight_value_mg: 802,
            knight_value_eg: 865,
            cannon_value_mg: 865,
            cannon_value_eg: 842,
            rook_value_mg: 1891,
            rook_value_eg: 2020,
        }
    }
}

impl EngineOptions {
    /// 公開するオプション定義を返す
    pub fn option_specs() -> &'static [OptionSpec] {
        OPTION_SPECS
    }

    fn field_mut(&mut self, name: &str) -> Option<&mut i32> {
        let field = match name {
            "PawnValueMg" => &mut self.pawn_value_mg,
            "PawnValueEg" => &mut self.pawn_value_eg,
            "BishopValueMg" => &mut self.bishop_value_mg,
            "BishopValueEg" => &mut self.bishop_value_eg,
            "AdvisorValueMg" => &mut self.advisor_value_mg,
            "AdvisorValueEg" => &mut self.advisor_value_eg,
            "KnightValueMg" => &mut self.knight_value_mg,
            "KnightValueEg" => &mut self.knight_value_eg,
            "CannonValueMg" => &mut self.cannon_value_mg,
            "CannonValueEg" => &mut self.cannon_value_eg,
            "RookValueMg" => &mut self.rook_value_mg,
            "RookValueEg" => &mut self.rook_value_eg,
            _ => return None,
        };
        Some(field)
    }

    /// オプション名から現在値を取得
    pub fn get(&self, name: &str) -> Option<i32> {
        let mut copy = *self;
        copy.field_mut(name).map(|v| *v)
    }

    /// オプション名と文字列の値を受け取り、対応する項目を更新する
    ///
    /// 名前の大文字・小文字は区別しない。
    pub fn set_option(&mut self, name: &str, value: &str) -> Result<i32, OptionError> {
        let spec = OPTION_SPECS
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| OptionError::UnknownName(name.to_string()))?;
        let parsed: i32 = value.trim().parse().map_err(|_| OptionError::InvalidValue {
            name: spec.name.to_string(),
            value: value.to_string(),
        })?;
        check_range(spec, parsed)?;

        if let Some(field) = self.field_mut(spec.name) {
            *field = parsed;
        }
        log::debug!("option {} = {}", spec.name, parsed);
        Ok(parsed)
    }

    /// 全項目が範囲内か検証する
    pub fn validate(&self) -> Result<(), OptionError> {
        for spec in OPTION_SPECS {
            if let Some(value) = self.get(spec.name) {
                check_range(spec, value)?;
            }
        }
        Ok(())
    }

    /// TOML文字列から読み込む（範囲検証つき）
    pub fn from_toml_str(s: &str) -> Result<Self, OptionError> {
        let options: EngineOptions = toml::from_str(s)?;
        options.validate()?;
        Ok(options)
    }
}

fn check_range(spec: &OptionSpec, value: i32) -> Result<(), OptionError> {
    if (spec.min..=spec.max).contains(&value) {
        Ok(())
    } else {
        Err(OptionError::OutOfRange {
            name: spec.name,
            value,
            min: spec.min,
            max: spec.max,
        })
    }
}
