use crate::auth::domain::{AuthResult, Credentials, LoginResponse, RegisterResponse, Registration};
use async_trait::async_trait;

#[async_trait]
pub trait AuthenticationPort: Send + Sync {
    /// 認証情報でログイン（2xx はすべて成功）
    async fn login(&self, credentials: &Credentials) -> AuthResult<LoginResponse>;
    /// ユーザー登録
    async fn register(&self, registration: &Registration) -> AuthResult<RegisterResponse>;
}

/// 呼び出しごとに一度だけ表示されるメッセージの出力先
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}
