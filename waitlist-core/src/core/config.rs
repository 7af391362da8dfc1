use chrono_tz::Tz;

/// 服务配置 - 候位核心的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (未设置) | 日志目录 (按天滚动) |
/// | BUSINESS_TIMEZONE | Asia/Seoul | 营业时区 |
/// | PHONE_DIGITS | 11 | 手机号位数 |
/// | RATING_DECIMAL_PLACES | 2 | 平均星级小数位 |
/// | FILTER_RADIUS_KM | 0.1 | 筛选搜索半径 |
/// | NEARBY_RADIUS_KM | 0.5 | 附近搜索默认半径 |
/// | ALTERNATIVE_RADIUS_KM | 1.0 | 替代推荐半径 |
///
/// # 示例
///
/// ```ignore
/// BUSINESS_TIMEZONE=Europe/Madrid PHONE_DIGITS=9 cargo test
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 运行环境: development | staging | production
    pub environment: String,
    /// tracing 日志级别
    pub log_level: String,
    /// 日志目录，设置后写入按天滚动的文件
    pub log_dir: Option<String>,
    /// 营业时区 (判断是否营业中)
    pub timezone: Tz,
    /// 标准化后手机号的位数
    pub phone_digits: usize,
    /// 平均星级保留的小数位
    pub rating_decimal_places: u32,
    /// 筛选搜索半径 (公里)
    pub filter_radius_km: f64,
    /// 附近搜索默认半径 (公里)
    pub nearby_radius_km: f64,
    /// 替代推荐半径 (公里)
    pub alternative_radius_km: f64,
}

/// Read an env var and parse it, falling back to `default` when unset or malformed
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.is_empty()),
            timezone: env_or("BUSINESS_TIMEZONE", chrono_tz::Asia::Seoul),
            phone_digits: env_or("PHONE_DIGITS", 11),
            rating_decimal_places: env_or("RATING_DECIMAL_PLACES", 2),
            filter_radius_km: env_or("FILTER_RADIUS_KM", 0.1),
            nearby_radius_km: env_or("NEARBY_RADIUS_KM", 0.5),
            alternative_radius_km: env_or("ALTERNATIVE_RADIUS_KM", 1.0),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(timezone: Tz, phone_digits: usize) -> Self {
        let mut config = Self::from_env();
        config.timezone = timezone;
        config.phone_digits = phone_digits;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
