//! Prompt templates for the stage generators.
//!
//! Every function here is pure string substitution: prior-stage artifacts go
//! in, the full prompt text comes out. The templates are Japanese because the
//! generated ad scripts are.

use crate::content::DataType;

/// One stage-1 input item, borrowed from its stored row.
#[derive(Debug, Clone, Copy)]
pub struct SourceMaterial<'a> {
    pub title: &'a str,
    pub content: &'a str,
    pub data_type: DataType,
    pub source_url: Option<&'a str>,
    pub tags: &'a [String],
}

/// Artifacts interpolated into the script prompt.
#[derive(Debug, Clone, Copy)]
pub struct ScriptInputs<'a> {
    pub product_summary: &'a str,
    pub education_content: &'a str,
    pub creative_parts: &'a str,
}

fn render_materials(materials: &[SourceMaterial<'_>]) -> String {
    let mut out = String::new();
    for (i, m) in materials.iter().enumerate() {
        out.push_str(&format!("### 資料{}: {}（{}）\n", i + 1, m.title.trim(), m.data_type.label()));
        if let Some(url) = m.source_url.filter(|u| !u.trim().is_empty()) {
            out.push_str(&format!("URL: {}\n", url.trim()));
        }
        if !m.tags.is_empty() {
            out.push_str(&format!("タグ: {}\n", m.tags.join(", ")));
        }
        out.push_str(m.content.trim());
        out.push_str("\n\n");
    }
    out
}

/// Stage 2: summarize every collected source item into a product brief.
pub fn product_summary_prompt(materials: &[SourceMaterial<'_>]) -> String {
    format!(
        "あなたはショート動画広告のマーケティングリサーチャーです。\n\
         以下の資料をもとに、商品情報サマリーを作成してください。\n\n\
         {}\
         ## 出力形式\n\
         - 商品名\n\
         - 商品カテゴリ\n\
         - 主な特徴・成分・仕様\n\
         - ターゲット顧客（年齢層・悩み・欲求）\n\
         - 競合との差別化ポイント\n\
         - 価格・オファー情報（資料にある場合のみ）\n\
         - 広告表現上の注意点（薬機法・景表法の観点）\n\n\
         資料に書かれていない事実を推測で補わないでください。",
        render_materials(materials)
    )
}

/// Stage 3: educational content that builds the viewer's problem awareness.
pub fn education_content_prompt(product_summary: &str, materials: &[SourceMaterial<'_>]) -> String {
    let titles: Vec<&str> = materials.iter().map(|m| m.title.trim()).collect();
    let sources = if titles.is_empty() {
        String::new()
    } else {
        format!("参考資料: {}\n\n", titles.join(" / "))
    };

    format!(
        "あなたはショート動画広告の構成作家です。\n\
         以下の商品情報サマリーをもとに、視聴者に「なぜこの商品が必要なのか」を\n\
         理解させる教育コンテンツを作成してください。\n\n\
         ## 商品情報サマリー\n{}\n\n\
         {}\
         ## 出力形式\n\
         1. ターゲットが抱える悩み・課題（3つ）\n\
         2. 悩みの原因の解説（専門知識をわかりやすく）\n\
         3. 一般的な解決策とその限界\n\
         4. 理想的な解決策の条件\n\
         5. 商品がその条件を満たす理由\n\n\
         誇大表現や効果の断定は避けてください。",
        product_summary.trim(),
        sources
    )
}

/// Stage 4: reusable creative building blocks (hooks, benefits, CTAs).
pub fn creative_parts_prompt(product_summary: &str, education_content: &str) -> String {
    format!(
        "あなたはショート動画広告のクリエイティブディレクターです。\n\
         以下の商品情報サマリーと教育コンテンツをもとに、台本の部品となる\n\
         クリエイティブパーツを作成してください。\n\n\
         ## 商品情報サマリー\n{}\n\n\
         ## 教育コンテンツ\n{}\n\n\
         ## 出力形式\n\
         - 冒頭フック（最初の3秒で目を止める一言）: 5案\n\
         - 共感パート（ターゲットの悩みの代弁）: 3案\n\
         - ベネフィット訴求: 5案\n\
         - 権威性・信頼性の根拠: 3案\n\
         - オファー・CTA: 3案\n\n\
         それぞれ1〜2文の短い話し言葉で書いてください。",
        product_summary.trim(),
        education_content.trim()
    )
}

/// Stage 5: a complete short-video script.
///
/// With `variation_of`, the prompt additionally asks for a script that is
/// clearly different in tone and structure from the given one.
pub fn script_prompt(inputs: &ScriptInputs<'_>, variation_of: Option<&str>) -> String {
    let mut prompt = format!(
        "あなたはショート動画広告（TikTok・Instagramリール・YouTubeショート）の\n\
         プロの台本ライターです。以下の情報をもとに、30〜60秒の広告台本を作成してください。\n\n\
         ## 商品情報サマリー\n{}\n\n\
         ## 教育コンテンツ\n{}\n\n\
         ## クリエイティブパーツ\n{}\n\n\
         ## 出力形式\n\
         シーンごとに「秒数 / 映像 / テロップ / ナレーション」を記載してください。\n\
         構成は「フック → 共感 → 教育 → 商品紹介 → ベネフィット → CTA」を基本とします。",
        inputs.product_summary.trim(),
        inputs.education_content.trim(),
        inputs.creative_parts.trim()
    );

    if let Some(base) = variation_of {
        prompt.push_str(&format!(
            "\n\n## バリエーション指示\n\
             以下の既存台本とは異なる切り口・トーン・構成で、別パターンの台本を作成してください。\n\
             フックとナレーションの言い回しは既存台本と重複させないでください。\n\n\
             ### 既存台本\n{}",
            base.trim()
        ));
    }

    prompt
}

/// Free-form rewrite of a piece of text according to an instruction.
pub fn text_edit_prompt(text: &str, instruction: &str) -> String {
    format!(
        "以下のテキストを指示に従って書き直してください。\n\
         書き直したテキストのみを出力し、説明や前置きは付けないでください。\n\n\
         ## 指示\n{}\n\n\
         ## テキスト\n{}",
        instruction.trim(),
        text.trim()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn material<'a>(title: &'a str, content: &'a str, tags: &'a [String]) -> SourceMaterial<'a> {
        SourceMaterial {
            title,
            content,
            data_type: DataType::Text,
            source_url: None,
            tags,
        }
    }

    #[test]
    fn summary_prompt_includes_every_material() {
        let tags = vec!["美容".to_string()];
        let prompt = product_summary_prompt(&[
            material("商品説明", "美容サプリ", &tags),
            material("口コミ", "飲みやすい", &[]),
        ]);
        assert!(prompt.contains("資料1: 商品説明（テキスト）"));
        assert!(prompt.contains("美容サプリ"));
        assert!(prompt.contains("タグ: 美容"));
        assert!(prompt.contains("資料2: 口コミ"));
    }

    #[test]
    fn url_materials_show_their_source() {
        let m = SourceMaterial {
            title: "LP",
            content: "本文",
            data_type: DataType::Url,
            source_url: Some("https://example.com/lp"),
            tags: &[],
        };
        let prompt = product_summary_prompt(&[m]);
        assert!(prompt.contains("URL: https://example.com/lp"));
        assert!(prompt.contains("（URL）"));
    }

    #[test]
    fn education_prompt_embeds_summary() {
        let prompt = education_content_prompt("  サマリー本文  ", &[]);
        assert!(prompt.contains("## 商品情報サマリー\nサマリー本文\n"));
        assert!(!prompt.contains("参考資料"));
    }

    #[test]
    fn creative_prompt_embeds_both_inputs() {
        let prompt = creative_parts_prompt("S", "E");
        assert!(prompt.contains("## 商品情報サマリー\nS"));
        assert!(prompt.contains("## 教育コンテンツ\nE"));
    }

    #[test]
    fn variation_prompt_extends_the_base_template() {
        let inputs = ScriptInputs {
            product_summary: "S",
            education_content: "E",
            creative_parts: "C",
        };
        let base = script_prompt(&inputs, None);
        let variation = script_prompt(&inputs, Some("元の台本"));
        assert!(variation.starts_with(&base));
        assert!(variation.contains("バリエーション指示"));
        assert!(variation.contains("元の台本"));
        assert!(!base.contains("バリエーション指示"));
    }
}
