use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::Page;
use crawl_logging::{crawl_debug, crawl_info, crawl_warn};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::{BrowserSettings, ControllerError, ElementState, PageController};

/// One launched Chromium with a single tab.
///
/// Call [`BrowserSession::close`] on every exit path; the crawler owns the
/// session exclusively for its whole lifetime.
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
    controller: ChromiumController,
}

impl BrowserSession {
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, ControllerError> {
        let mut builder = BrowserConfig::builder()
            .window_size(settings.window_width, settings.window_height)
            .arg("--disable-gpu")
            .arg(format!("--user-agent={}", settings.user_agent));
        if !settings.headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(ControllerError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|err| ControllerError::Launch(err.to_string()))?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    crawl_debug!("Browser handler event error: {}", err);
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|err| ControllerError::Launch(err.to_string()))?;
        crawl_info!("Browser launched");

        Ok(Self {
            browser,
            handler,
            controller: ChromiumController { page },
        })
    }

    pub fn controller(&self) -> &ChromiumController {
        &self.controller
    }

    /// Shuts the browser down. Failures are logged, never returned.
    pub async fn close(mut self) {
        if let Err(err) = self.browser.close().await {
            crawl_warn!("Browser close failed: {}", err);
        }
        if let Err(err) = self.browser.wait().await {
            crawl_warn!("Waiting for browser exit failed: {}", err);
        }
        self.handler.abort();
        crawl_info!("Browser closed");
    }
}

#[derive(Debug, Deserialize)]
struct ProbeResult {
    found: bool,
    disabled: bool,
}

/// [`PageController`] backed by a Chromium tab.
#[derive(Clone)]
pub struct ChromiumController {
    page: Page,
}

impl ChromiumController {
    async fn evaluate<T: DeserializeOwned>(&self, script: String) -> Result<T, ControllerError> {
        let result = self
            .page
            .evaluate_expression(EvaluateParams::new(script))
            .await
            .map_err(|err| ControllerError::Script(err.to_string()))?;
        result
            .into_value()
            .map_err(|err| ControllerError::Script(err.to_string()))
    }
}

fn js_string(value: &str) -> Result<String, ControllerError> {
    serde_json::to_string(value).map_err(|err| ControllerError::Script(err.to_string()))
}

#[async_trait]
impl PageController for ChromiumController {
    async fn navigate(&self, url: &str) -> Result<(), ControllerError> {
        self.page
            .goto(url)
            .await
            .map_err(|err| ControllerError::Navigation {
                url: url.to_string(),
                message: err.to_string(),
            })?;
        Ok(())
    }

    async fn current_location(&self) -> Result<String, ControllerError> {
        let url = self
            .page
            .url()
            .await
            .map_err(|err| ControllerError::Script(err.to_string()))?;
        Ok(url.unwrap_or_default())
    }

    async fn probe_element(&self, selector: &str) -> Result<Option<ElementState>, ControllerError> {
        // Controls are often icons inside a button; the button carries `disabled`.
        let script = format!(
            "(() => {{
                const el = document.querySelector({sel});
                if (!el) {{ return {{ found: false, disabled: false }}; }}
                const button = el.closest('button') || el;
                return {{ found: true, disabled: !!button.disabled || button.hasAttribute('disabled') }};
            }})()",
            sel = js_string(selector)?
        );
        let probe: ProbeResult = self.evaluate(script).await?;
        Ok(probe.found.then_some(ElementState {
            disabled: probe.disabled,
        }))
    }

    async fn click(&self, selector: &str) -> Result<bool, ControllerError> {
        let script = format!(
            "(() => {{
                const el = document.querySelector({sel});
                if (!el) {{ return false; }}
                el.scrollIntoView(true);
                el.click();
                return true;
            }})()",
            sel = js_string(selector)?
        );
        self.evaluate(script).await
    }

    async fn press_escape(&self, selector: &str) -> Result<(), ControllerError> {
        let element_error = |err: chromiumoxide::error::CdpError| ControllerError::Element {
            selector: selector.to_string(),
            message: err.to_string(),
        };
        let element = self.page.find_element(selector).await.map_err(element_error)?;
        element.press_key("Escape").await.map_err(element_error)?;
        Ok(())
    }

    async fn scroll_page(&self, pause: Duration) -> Result<(), ControllerError> {
        let _: bool = self
            .evaluate("(() => { window.scrollTo(0, document.body.scrollHeight); return true; })()".to_string())
            .await?;
        sleep(pause).await;
        let _: bool = self
            .evaluate("(() => { window.scrollTo(0, 0); return true; })()".to_string())
            .await?;
        sleep(pause).await;
        Ok(())
    }
}
