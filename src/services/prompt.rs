use super::analysis_service::TokenAnalysis;
use crate::models::Timeframe;

pub const SYSTEM_PROMPT: &str = "You are a professional cryptocurrency analyst with extensive market experience and deep technical analysis capabilities. Please provide objective and professional analysis based on the provided data.";

const REPORT_INSTRUCTIONS: &str = "
Please provide a professional analysis report based on the above real technical indicator data:

1. Technical Analysis Summary:
   - Comprehensive analysis based on RSI, MACD, Bollinger Bands and other indicators
   - Current price position relative to support and resistance levels
   - Trend strength and direction assessment

2. Multi-timeframe Analysis:
   - Short-term (1 day), medium-term (3 days-1 week), long-term (1 month) trends
   - Buy/sell signal strength across timeframes

3. Key Price Level Analysis:
   - Support and resistance level effectiveness
   - Bollinger Bands position analysis
   - Breakout probability assessment

4. Trading Signals:
   - Buy/sell signals based on MACD and RSI
   - Entry and exit timing recommendations
   - Stop-loss and take-profit level suggestions

5. Risk Level Assessment (1-10):
   - Technical risk
   - Market risk
   - Liquidity risk

6. Investment Recommendations:
   - Suitable investor types
   - Position management suggestions
   - Risk control measures

Please respond in English, keeping it professional, objective and practical.
";

/// Render the user prompt for an AI token analysis
pub fn build_analysis_prompt(analysis: &TokenAnalysis) -> String {
    let snapshot = &analysis.snapshot;
    let bundle = &analysis.indicators;
    let macd = &bundle.trend_oscillator;

    // Indicator values use `{:?}` so whole numbers keep their trailing `.0`
    let mut prompt = format!(
        "
As a professional cryptocurrency analyst, please analyze based on the following real data:

Token Information:
- Name: {name}
- Symbol: {symbol}
- Current Price: ${price:.6}
- 24h Change: {change:.2}%
- Market Cap: ${market_cap}
- 24h Volume: ${volume}

Technical Indicators:
- RSI (14): {rsi:?}
- MACD: {macd_main:?}
- MACD Signal: {macd_signal:?}
- MACD Histogram: {macd_divergence:?}
- Support Level: ${support:?}
- Resistance Level: ${resistance:?}
- Current Trend: {trend}

Bollinger Bands:
- Upper: ${upper:?}
- Middle: ${middle:?}
- Lower: ${lower:?}

Timeframe Analysis:
",
        name = analysis.name,
        symbol = analysis.symbol,
        price = snapshot.current_price,
        change = snapshot.price_change_percentage_24h,
        market_cap = format_thousands(snapshot.market_cap),
        volume = format_thousands(snapshot.total_volume),
        rsi = bundle.momentum,
        macd_main = macd.main,
        macd_signal = macd.signal,
        macd_divergence = macd.divergence,
        support = bundle.levels.floor,
        resistance = bundle.levels.ceiling,
        trend = bundle.trend,
        upper = bundle.bands.upper,
        middle = bundle.bands.middle,
        lower = bundle.bands.lower,
    );

    for timeframe in Timeframe::ALL {
        if let Some(change) = analysis.price_changes.get(&timeframe) {
            prompt.push_str(&format!("- {}: {:.2}%\n", timeframe, change));
        }
    }

    prompt.push('\n');
    prompt.push_str(REPORT_INSTRUCTIONS);
    prompt
}

/// Whole-number formatting with comma thousands separators
fn format_thousands(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value.round() < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
