//! The page for uploading a statement.

use axum::response::{IntoResponse, Response};
use maud::{Markup, PreEscaped, html};

use crate::{
    config::MAX_UPLOAD_BYTES,
    endpoints,
    html::{
        ALERT_ERROR_STYLE, ALERT_SUCCESS_STYLE, BUTTON_PRIMARY_STYLE, FORM_FILE_INPUT_STYLE,
        HeadElement, base,
    },
    upload::FILE_FIELD,
};

/// Submits the form with `fetch` so that errors can be shown on the page and
/// the spreadsheet is saved under the name chosen by the server.
const UPLOAD_SCRIPT: &str = r#"
document.addEventListener("DOMContentLoaded", () => {
    const form = document.getElementById("upload-form");
    const input = document.getElementById("file");
    const button = document.getElementById("submit-button");
    const success = document.getElementById("success-message");
    const error = document.getElementById("error-message");
    const maxBytes = Number(form.dataset.maxBytes);

    const showError = (message) => {
        error.textContent = message;
        error.hidden = false;
    };

    form.addEventListener("submit", async (event) => {
        event.preventDefault();
        success.hidden = true;
        error.hidden = true;

        const file = input.files[0];
        if (!file) {
            showError("Please select a PDF file");
            return;
        }
        if (!file.name.toLowerCase().endsWith(".pdf")) {
            showError("Please select a PDF file");
            return;
        }
        if (file.size > maxBytes) {
            showError("File size must be less than 16MB");
            return;
        }

        button.disabled = true;
        button.textContent = "Converting...";

        try {
            const response = await fetch(form.action, {
                method: "POST",
                body: new FormData(form),
            });

            if (!response.ok) {
                const body = await response.json().catch(() => ({}));
                throw new Error(body.error || "Conversion failed");
            }

            const disposition = response.headers.get("Content-Disposition") || "";
            const match = disposition.match(/filename="([^"]+)"/);
            const blob = await response.blob();
            const url = URL.createObjectURL(blob);
            const link = document.createElement("a");
            link.href = url;
            link.download = match ? match[1] : "payout_statement.xlsx";
            document.body.appendChild(link);
            link.click();
            link.remove();
            URL.revokeObjectURL(url);

            success.hidden = false;
        } catch (err) {
            showError(err.message || "An error occurred while processing your file");
        } finally {
            button.disabled = false;
            button.textContent = "Convert to Excel";
        }
    });
});
"#;

fn upload_form_view() -> Markup {
    html! {
        form
            id="upload-form"
            action=(endpoints::UPLOAD)
            method="post"
            enctype="multipart/form-data"
            data-max-bytes=(MAX_UPLOAD_BYTES)
        {
            label for="file"
            {
                "Choose a weekly payout statement (PDF, up to 16MB)"
            }

            input
                id="file"
                type="file"
                name=(FILE_FIELD)
                accept=".pdf,application/pdf"
                required
                class=(FORM_FILE_INPUT_STYLE);

            button type="submit" id="submit-button" class=(BUTTON_PRIMARY_STYLE)
            {
                "Convert to Excel"
            }
        }

        p id="success-message" class=(ALERT_SUCCESS_STYLE) hidden
        {
            "Your Excel file has been downloaded successfully!"
        }

        p id="error-message" class=(ALERT_ERROR_STYLE) role="alert" hidden {}
    }
}

fn index_view() -> Markup {
    let content = html! {
        main
        {
            h1 { "Statement to Excel" }

            p
            {
                "Upload a weekly payout statement to get its transactions as a spreadsheet."
            }

            (upload_form_view())
        }
    };

    base(
        "Convert Statement",
        &[HeadElement::ScriptSource(PreEscaped(UPLOAD_SCRIPT.to_owned()))],
        &content,
    )
}

/// Route handler for the upload page.
pub async fn get_index_page() -> Response {
    index_view().into_response()
}
