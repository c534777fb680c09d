// Source: https://api.gemini.com/v1/book/{symbol}
#[derive(Debug, serde::Deserialize)]
pub struct GeminiBook {
    pub bids: Vec<GeminiLevel>,
    pub asks: Vec<GeminiLevel>,
}

#[derive(Debug, serde::Deserialize)]
pub struct GeminiLevel {
    pub price: String,  // e.g. "64123.45"
    pub amount: String, // e.g. "0.015"
}
