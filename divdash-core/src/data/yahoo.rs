//! Yahoo Finance data provider.
//!
//! Quotes come from the v10 quoteSummary API, daily closes and dividend
//! events from the v8 chart API. quoteSummary requires an anonymous session
//! (cookie + crumb), which `YahooProvider::connect` establishes up front so a
//! dead provider is reported before any ticker is processed.
//!
//! Yahoo Finance has no official API and is subject to unannounced format
//! changes. Requests are made once; there is no retry.

use super::provider::{
    ClosePoint, DataError, DividendPayment, MarketDataProvider, Period, QuoteFields,
};
use chrono::NaiveDate;
use log::debug;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";

/// Default host that hands out the session cookie.
pub const DEFAULT_SESSION_URL: &str = "https://fc.yahoo.com";

const QUOTE_MODULES: &str = "price,summaryDetail,financialData,assetProfile";

// ─── chart API ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    events: Option<ChartEvents>,
    indicators: Option<Indicators>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartMeta {
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct ChartEvents {
    #[serde(default)]
    dividends: BTreeMap<String, DividendEvent>,
}

#[derive(Debug, Deserialize)]
struct DividendEvent {
    amount: f64,
    date: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

// ─── quoteSummary API ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteSummaryResponse {
    quote_summary: QuoteSummaryResult,
}

#[derive(Debug, Deserialize)]
struct QuoteSummaryResult {
    result: Option<Vec<QuoteModules>>,
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QuoteModules {
    #[serde(default)]
    price: PriceModule,
    #[serde(default)]
    summary_detail: SummaryDetailModule,
    #[serde(default)]
    financial_data: FinancialDataModule,
    #[serde(default)]
    asset_profile: AssetProfileModule,
}

/// Yahoo wraps numbers as `{"raw": 1.23, "fmt": "1.23"}`, or `{}` when absent.
#[derive(Debug, Default, Deserialize)]
struct RawValue {
    raw: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PriceModule {
    regular_market_price: Option<RawValue>,
    market_cap: Option<RawValue>,
    short_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryDetailModule {
    dividend_rate: Option<RawValue>,
    dividend_yield: Option<RawValue>,
    payout_ratio: Option<RawValue>,
    market_cap: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FinancialDataModule {
    current_price: Option<RawValue>,
}

#[derive(Debug, Default, Deserialize)]
struct AssetProfileModule {
    sector: Option<String>,
}

fn raw(v: &Option<RawValue>) -> Option<f64> {
    v.as_ref().and_then(|r| r.raw)
}

// ─── provider ───────────────────────────────────────────────────────

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    base_url: String,
    crumb: String,
}

impl YahooProvider {
    fn build_client() -> Result<reqwest::blocking::Client, DataError> {
        reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .cookie_store(true)
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))
    }

    /// Establish an anonymous session and obtain the crumb quoteSummary needs.
    ///
    /// The cookie comes from `session_url`; the crumb and all data requests
    /// go to `base_url`.
    pub fn connect(base_url: &str, session_url: &str) -> Result<Self, DataError> {
        Self::establish(Self::build_client()?, base_url, session_url)
    }

    fn establish(
        client: reqwest::blocking::Client,
        base_url: &str,
        session_url: &str,
    ) -> Result<Self, DataError> {
        let base_url = base_url.trim_end_matches('/').to_string();

        // Answers 404 but sets the session cookie either way.
        client
            .get(session_url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;

        let resp = client
            .get(format!("{base_url}/v1/test/getcrumb"))
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(DataError::AuthenticationRequired(format!(
                "crumb request returned HTTP {status}"
            )));
        }
        let crumb = resp
            .text()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?
            .trim()
            .to_string();
        if crumb.is_empty() || crumb.contains('<') {
            return Err(DataError::AuthenticationRequired(
                "provider returned an empty crumb".into(),
            ));
        }

        debug!("yahoo session established against {base_url}");
        Ok(Self {
            client,
            base_url,
            crumb,
        })
    }

    fn chart_request(
        &self,
        symbol: &str,
        range: &str,
        interval: &str,
    ) -> reqwest::blocking::RequestBuilder {
        self.client
            .get(format!("{}/v8/finance/chart/{symbol}", self.base_url))
            .query(&[("range", range), ("interval", interval), ("events", "div")])
    }

    fn quote_request(&self, symbol: &str) -> reqwest::blocking::RequestBuilder {
        self.client
            .get(format!("{}/v10/finance/quoteSummary/{symbol}", self.base_url))
            .query(&[("modules", QUOTE_MODULES), ("crumb", self.crumb.as_str())])
    }

    /// Send a request once and decode the JSON body, mapping HTTP failures.
    fn get_json<T: DeserializeOwned>(
        symbol: &str,
        req: reqwest::blocking::RequestBuilder,
    ) -> Result<T, DataError> {
        let resp = req
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;
        let status = resp.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            });
        }
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(DataError::AuthenticationRequired(format!(
                "HTTP {status} for {symbol}"
            )));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::RateLimited);
        }
        if !status.is_success() {
            return Err(DataError::HttpStatus {
                status: status.as_u16(),
                symbol: symbol.to_string(),
            });
        }

        resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })
    }

    fn api_error(symbol: &str, err: Option<ApiError>) -> DataError {
        match err {
            Some(err) if err.code == "Not Found" => DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            Some(err) => {
                DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description))
            }
            None => DataError::ResponseFormatChanged("empty result with no error".into()),
        }
    }

    fn first_chart(symbol: &str, resp: ChartResponse) -> Result<ChartData, DataError> {
        let ChartResult { result, error } = resp.chart;
        result
            .ok_or_else(|| Self::api_error(symbol, error))?
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))
    }

    /// Exchange-local calendar date of a unix timestamp.
    fn local_date(ts: i64, gmtoffset: i64) -> Result<NaiveDate, DataError> {
        chrono::DateTime::from_timestamp(ts + gmtoffset, 0)
            .map(|dt| dt.naive_utc().date())
            .ok_or_else(|| DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}")))
    }

    fn parse_closes(symbol: &str, resp: ChartResponse) -> Result<Vec<ClosePoint>, DataError> {
        let data = Self::first_chart(symbol, resp)?;
        let offset = data.meta.gmtoffset.unwrap_or(0);

        // Symbols with no trading in the window come back without timestamps.
        let Some(timestamps) = data.timestamp else {
            return Ok(Vec::new());
        };

        let closes = data
            .indicators
            .and_then(|ind| ind.quote.into_iter().next())
            .map(|q| q.close)
            .ok_or_else(|| DataError::ResponseFormatChanged("no quote data".into()))?;

        let mut points = Vec::with_capacity(timestamps.len());
        for (i, &ts) in timestamps.iter().enumerate() {
            // Holidays and halted sessions carry null closes
            let Some(close) = closes.get(i).copied().flatten() else {
                continue;
            };
            points.push(ClosePoint {
                date: Self::local_date(ts, offset)?,
                close,
            });
        }
        Ok(points)
    }

    fn parse_dividends(
        symbol: &str,
        resp: ChartResponse,
    ) -> Result<Vec<DividendPayment>, DataError> {
        let data = Self::first_chart(symbol, resp)?;
        let offset = data.meta.gmtoffset.unwrap_or(0);
        let Some(events) = data.events else {
            return Ok(Vec::new());
        };

        let mut payments = events
            .dividends
            .into_values()
            .map(|ev| {
                Ok(DividendPayment {
                    date: Self::local_date(ev.date, offset)?,
                    amount: ev.amount,
                })
            })
            .collect::<Result<Vec<_>, DataError>>()?;
        // Event keys are timestamps as strings, so map order is lexical
        payments.sort_by_key(|p| p.date);
        Ok(payments)
    }

    fn parse_quote(symbol: &str, resp: QuoteSummaryResponse) -> Result<QuoteFields, DataError> {
        let QuoteSummaryResult { result, error } = resp.quote_summary;
        let modules = result
            .ok_or_else(|| Self::api_error(symbol, error))?
            .into_iter()
            .next()
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        let market_cap = raw(&modules.summary_detail.market_cap)
            .or_else(|| raw(&modules.price.market_cap))
            .filter(|v| *v >= 0.0)
            .map(|v| v as u64);

        Ok(QuoteFields {
            current_price: raw(&modules.financial_data.current_price),
            regular_market_price: raw(&modules.price.regular_market_price),
            dividend_rate: raw(&modules.summary_detail.dividend_rate),
            dividend_yield: raw(&modules.summary_detail.dividend_yield),
            payout_ratio: raw(&modules.summary_detail.payout_ratio),
            market_cap,
            sector: modules.asset_profile.sector,
            short_name: modules.price.short_name,
        })
    }
}

impl MarketDataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn quote(&self, symbol: &str) -> Result<QuoteFields, DataError> {
        let resp = Self::get_json(symbol, self.quote_request(symbol))?;
        Self::parse_quote(symbol, resp)
    }

    fn closes(&self, symbol: &str, period: Period) -> Result<Vec<ClosePoint>, DataError> {
        let resp = Self::get_json(symbol, self.chart_request(symbol, period.label(), "1d"))?;
        Self::parse_closes(symbol, resp)
    }

    fn dividends(&self, symbol: &str) -> Result<Vec<DividendPayment>, DataError> {
        // Monthly bars keep the payload small; dividend events are exact-dated regardless
        let resp = Self::get_json(symbol, self.chart_request(symbol, "max", "1mo"))?;
        Self::parse_dividends(symbol, resp)
    }
}
