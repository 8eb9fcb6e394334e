use v_htmlescape::escape;

use crate::core::flow::ConfirmationPolicy;
use crate::core::form::FormVariant;
use crate::domain::model::CapitalBand;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Landing(LandingView),
    Confirmation(ConfirmationView),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LandingView {
    /// Set while the player is embedded; the thumbnail shows otherwise.
    pub embed_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub show_scroll_hint: bool,
    pub overlay_open: bool,
    pub form_visible: bool,
    pub form: FormView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub variant: FormVariant,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub capital_band: Option<CapitalBand>,
    pub error: Option<String>,
    pub submitting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfirmationView {
    pub redirect_url: Option<String>,
    pub redirect_delay_ms: Option<u64>,
}

impl ConfirmationView {
    pub fn from_policy(policy: &ConfirmationPolicy) -> Self {
        let redirect = policy.redirect();
        Self {
            redirect_url: redirect.map(|(url, _)| url.to_string()),
            redirect_delay_ms: redirect.map(|(_, delay)| delay.as_millis() as u64),
        }
    }
}

pub fn render(view: &View) -> String {
    match view {
        View::Landing(landing) => render_landing_page(landing),
        View::Confirmation(confirmation) => render_confirmation_page(confirmation),
    }
}

fn page_shell(title: &str, head_extra: &str, body: &str) -> String {
    format!(
        r##"<!DOCTYPE html>
<html lang="pt-BR">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    {head_extra}
    <style>
        body {{
            margin: 0;
            font-family: 'Inter', system-ui, sans-serif;
            background: #020b14;
            color: #e2e8f0;
        }}
        main {{
            width: min(880px, 94vw);
            margin: 2.5rem auto 5rem;
        }}
        .video {{
            position: relative;
            aspect-ratio: 16 / 9;
            border-radius: 18px;
            overflow: hidden;
            border: 1px solid rgba(0, 161, 255, 0.2);
        }}
        .video iframe, .video img {{
            width: 100%;
            height: 100%;
            border: 0;
            object-fit: cover;
        }}
        .lead-form.hidden {{
            opacity: 0;
            height: 0;
            overflow: hidden;
            pointer-events: none;
        }}
        .error {{
            padding: 0.75rem;
            border: 1px solid rgba(239, 68, 68, 0.5);
            border-radius: 10px;
            color: #fecaca;
        }}
        .overlay {{
            position: fixed;
            inset: 0;
            display: flex;
            align-items: center;
            justify-content: center;
            background: rgba(0, 0, 0, 0.8);
        }}
    </style>
</head>
<body>
{body}
</body>
</html>
"##,
        title = escape(title),
        head_extra = head_extra,
        body = body,
    )
}

pub fn render_landing_page(view: &LandingView) -> String {
    let player = match (&view.embed_url, &view.thumbnail_url) {
        (Some(embed), _) => format!(
            r#"<iframe src="{}" title="VSL Video" allow="autoplay; encrypted-media; picture-in-picture" allowfullscreen></iframe>"#,
            escape(embed)
        ),
        (None, Some(thumbnail)) => format!(
            r#"<img src="{}" alt="Video thumbnail"><button type="button" class="play" data-action="play">Click to watch with sound</button>"#,
            escape(thumbnail)
        ),
        (None, None) => {
            r#"<button type="button" class="play" data-action="play">Click to watch with sound</button>"#
                .to_string()
        }
    };

    let hint = if view.show_scroll_hint {
        r#"<div class="scroll-hint" aria-hidden="true">&#8964;</div>"#
    } else {
        ""
    };

    let overlay = if view.overlay_open {
        r#"<div class="overlay" role="dialog">
    <div class="card">
        <button type="button" data-action="dismiss-overlay" aria-label="Close">&times;</button>
        <h2>No time to watch the video right now?</h2>
        <p>If you already know what you are looking for, skip the video and go straight to the sign-up.</p>
        <button type="button" data-action="skip-video">SKIP VIDEO AND UNLOCK MY ACCESS</button>
    </div>
</div>"#
    } else {
        ""
    };

    let body = format!(
        r#"{overlay}
<main>
    <header>
        <h1>Discover the method to scale your sales in 30 days</h1>
        <p>Watch the short video below before it goes offline.</p>
    </header>
    <section class="video">{player}</section>
    <p class="note">Secure, exclusive video. Please watch until the end.</p>
    {form}
    {hint}
</main>"#,
        overlay = overlay,
        player = player,
        form = render_form(&view.form, view.form_visible),
        hint = hint,
    );

    page_shell("Exclusive video", "", &body)
}

fn render_form(form: &FormView, visible: bool) -> String {
    let error = form
        .error
        .as_deref()
        .map(|message| format!(r#"<div class="error" role="alert">{}</div>"#, escape(message)))
        .unwrap_or_default();

    let capital = match form.variant {
        FormVariant::Basic => String::new(),
        FormVariant::Extended => {
            let options: String = CapitalBand::ALL
                .iter()
                .map(|band| {
                    let checked = if form.capital_band == Some(*band) {
                        " checked"
                    } else {
                        ""
                    };
                    format!(
                        r#"<label><input type="radio" name="capital" value="{}"{} required> {}</label>"#,
                        band.as_str(),
                        checked,
                        escape(band.label())
                    )
                })
                .collect();
            format!(
                r#"<fieldset><legend>Available capital</legend>{}</fieldset>"#,
                options
            )
        }
    };

    let submit_label = if form.submitting {
        "Sending..."
    } else {
        "I WANT MY SPOT NOW"
    };

    format!(
        r#"<section id="lead-form" class="lead-form{hidden}">
        <h2>Secure your spot now</h2>
        <form method="post">
            {error}
            <label for="nome">Full name<input id="nome" name="nome" type="text" required value="{name}"></label>
            <label for="email">Best e-mail<input id="email" name="email" type="email" required value="{email}"></label>
            <label for="telefone">WhatsApp<input id="telefone" name="telefone" type="tel" required value="{phone}"></label>
            {capital}
            <button type="submit"{disabled}>{submit_label}</button>
        </form>
    </section>"#,
        hidden = if visible { "" } else { " hidden" },
        error = error,
        name = escape(&form.name),
        email = escape(&form.email),
        phone = escape(&form.phone),
        capital = capital,
        disabled = if form.submitting { " disabled" } else { "" },
        submit_label = submit_label,
    )
}

pub fn render_confirmation_page(view: &ConfirmationView) -> String {
    let (head_extra, redirect) = match (&view.redirect_url, view.redirect_delay_ms) {
        (Some(url), delay) => {
            let seconds = delay.unwrap_or(0).div_ceil(1000);
            (
                format!(
                    r#"<meta http-equiv="refresh" content="{}; url={}">"#,
                    seconds,
                    escape(url)
                ),
                format!(
                    r#"<p>You will be taken to our VIP WhatsApp group.</p>
        <p class="status">Please wait, redirecting...</p>
        <a href="{}">Not redirected? Click here</a>"#,
                    escape(url)
                ),
            )
        }
        (None, _) => (String::new(), String::new()),
    };

    let body = format!(
        r#"<main class="confirmation">
        <h1>Registration confirmed!</h1>
        <p>Thank you. Your details are with our team.</p>
        {redirect}
</main>"#,
        redirect = redirect
    );

    page_shell("Registration confirmed", &head_extra, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(variant: FormVariant) -> FormView {
        FormView {
            variant,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            capital_band: None,
            error: None,
            submitting: false,
        }
    }

    fn landing() -> LandingView {
        LandingView {
            embed_url: None,
            thumbnail_url: Some("https://img.youtube.com/vi/x/maxresdefault.jpg".to_string()),
            show_scroll_hint: false,
            overlay_open: false,
            form_visible: false,
            form: form(FormVariant::Basic),
        }
    }

    #[test]
    fn test_hidden_form_and_thumbnail_before_play() {
        let html = render_landing_page(&landing());
        assert!(html.contains(r#"class="lead-form hidden""#));
        assert!(html.contains("maxresdefault.jpg"));
        assert!(!html.contains("<iframe"));
        assert!(!html.contains(r#"role="dialog""#));
    }

    #[test]
    fn test_user_input_is_escaped() {
        let mut view = landing();
        view.form_visible = true;
        view.form.name = "<script>alert(1)</script>".to_string();
        view.form.error = Some("bad \"quote\"".to_string());

        let html = render_landing_page(&view);

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains(r#"class="lead-form""#));
        assert!(html.contains(r#"role="alert""#));
    }

    #[test]
    fn test_extended_form_lists_four_bands() {
        let mut view = landing();
        view.form = form(FormVariant::Extended);
        view.form.capital_band = Some(CapitalBand::From200kTo1m);

        let html = render_landing_page(&view);

        assert_eq!(html.matches(r#"name="capital""#).count(), 4);
        assert!(html.contains(r#"value="200k_to_1m" checked"#));
    }

    #[test]
    fn test_submitting_disables_button() {
        let mut view = landing();
        view.form.submitting = true;
        let html = render_landing_page(&view);
        assert!(html.contains("disabled"));
        assert!(html.contains("Sending..."));
    }

    #[test]
    fn test_confirmation_redirect_and_manual_link() {
        let html = render(&View::Confirmation(ConfirmationView {
            redirect_url: Some("https://chat.whatsapp.com/abc".to_string()),
            redirect_delay_ms: Some(2000),
        }));
        let target = "https:&#x2f;&#x2f;chat.whatsapp.com&#x2f;abc";
        assert!(html.contains(&format!(r#"content="2; url={}""#, target)));
        assert!(html.contains(&format!(r#"<a href="{}">Not redirected? Click here</a>"#, target)));
        assert!(html.contains("VIP WhatsApp group"));

        let fixed = render_confirmation_page(&ConfirmationView {
            redirect_url: None,
            redirect_delay_ms: None,
        });
        assert!(!fixed.contains("http-equiv"));
        assert!(!fixed.contains("<a href"));
        assert!(!fixed.contains("WhatsApp"));
        assert!(fixed.contains("Registration confirmed!"));
    }
}
