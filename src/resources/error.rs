//! 资源检索错误类型

use thiserror::Error;

/// 查询数据集/代码仓库平台时可能出现的错误
#[derive(Debug, Error)]
pub enum ResourceError {
    /// HTTP传输错误
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// 平台返回了非成功状态码
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP状态码
        status: u16,
        /// 错误信息或响应体
        message: String,
    },
}

impl ResourceError {
    /// 读取失败响应的状态码与响应体
    pub(crate) async fn from_response(resp: reqwest::Response) -> Self {
        ResourceError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        }
    }
}
