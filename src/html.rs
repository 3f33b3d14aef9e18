//! Shared page layout and styles.

use maud::{DOCTYPE, Markup, PreEscaped, html};

pub const BUTTON_PRIMARY_STYLE: &str = "button-primary";
pub const FORM_FILE_INPUT_STYLE: &str = "file-input";
pub const ALERT_ERROR_STYLE: &str = "alert alert-error";
pub const ALERT_SUCCESS_STYLE: &str = "alert alert-success";

const STYLESHEET: &str = r#"
body {
    font-family: system-ui, -apple-system, "Segoe UI", sans-serif;
    margin: 0;
    min-height: 100vh;
    display: flex;
    align-items: center;
    justify-content: center;
    background: #f3f4f6;
    color: #111827;
}

main {
    width: 100%;
    max-width: 32rem;
    padding: 2rem;
    background: white;
    border-radius: 0.5rem;
    box-shadow: 0 1px 3px rgba(0, 0, 0, 0.1);
}

.file-input {
    display: block;
    width: 100%;
    padding: 2rem 0.5rem;
    border: 2px dashed #9ca3af;
    border-radius: 0.5rem;
    box-sizing: border-box;
}

.button-primary {
    width: 100%;
    margin-top: 1rem;
    padding: 0.5rem 1rem;
    border: none;
    border-radius: 0.25rem;
    background: #366092;
    color: white;
    font-size: 1rem;
    cursor: pointer;
}

.button-primary:disabled {
    background: #6b7280;
}

.alert {
    margin-top: 1rem;
    padding: 0.75rem 1rem;
    border-radius: 0.25rem;
}

.alert-error {
    background: #fee2e2;
    color: #991b1b;
}

.alert-success {
    background: #dcfce7;
    color: #166534;
}

[hidden] {
    display: none;
}
"#;

pub enum HeadElement {
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Payout Sheet" }
                style { (PreEscaped(STYLESHEET)) }

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script defer { (text) }
                    }
                }
            }
            body
            {
                (content)
            }
        }
    }
}
