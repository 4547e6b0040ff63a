//! # Redis 캐시 클라이언트 구현
//!
//! Redis를 백엔드로 하는 캐시 클라이언트를 제공합니다.
//! 타입 안전성과 비동기 처리를 지원하며, Serde를 통한 투명한 JSON
//! 직렬화/역직렬화를 제공합니다.
//!
//! ## 연결 관리
//!
//! Redis 연결은 멀티플렉싱을 사용하여 단일 TCP 연결에서
//! 여러 동시 요청을 효율적으로 처리합니다.

use redis::{AsyncCommands, Client};
use serde::{Serialize, de::DeserializeOwned};
use std::env;

/// Redis 캐시 클라이언트 래퍼
///
/// ## 특징
///
/// - **멀티플렉싱 연결**: 단일 연결에서 여러 동시 요청 처리
/// - **자동 직렬화**: JSON 기반 객체 저장/조회
/// - **타입 안전성**: 제네릭을 통한 컴파일 타임 타입 검증
///
/// ## 사용 예제
///
/// ```rust,ignore
/// let redis = RedisClient::new().await?;
///
/// // 사용자 정보 캐싱 (10분 TTL)
/// redis.set_with_expiry("user:123", &user, 600).await?;
///
/// // 캐시된 데이터 조회
/// let cached: Option<User> = redis.get("user:123").await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    /// Redis 클라이언트 인스턴스
    client: Client,
}

impl RedisClient {
    /// 새 Redis 클라이언트 인스턴스를 생성합니다.
    ///
    /// 환경 변수 `REDIS_URL`에서 Redis 서버 주소를 읽어오며,
    /// 설정되지 않은 경우 기본값 `redis://localhost:6379`를 사용합니다.
    /// 생성 시 PING으로 서버 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let redis_url = env::var("REDIS_URL")
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let client = Client::open(redis_url)?;

        // 연결 테스트 - PING 명령으로 서버 가용성 확인
        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        println!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    /// 지정된 키에서 값을 조회합니다.
    ///
    /// JSON으로 직렬화된 데이터를 자동으로 역직렬화하여 반환합니다.
    ///
    /// ## 반환값
    ///
    /// - `Ok(Some(T))` - 키가 존재하고 역직렬화 성공
    /// - `Ok(None)` - 키가 존재하지 않음
    /// - `Err(RedisError)` - Redis 오류 또는 역직렬화 실패
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(key).await?;

        match value {
            Some(json) => {
                let deserialized = serde_json::from_str(&json)
                    .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Deserialization failed", e.to_string())))?;
                Ok(Some(deserialized))
            }
            None => Ok(None),
        }
    }

    /// 지정된 키에 값을 저장합니다 (만료 없음).
    ///
    /// 객체를 JSON으로 직렬화하여 Redis에 저장합니다.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;

        conn.set::<_, _, ()>(key, json).await?;
        Ok(())
    }

    /// 지정된 키에 값을 TTL과 함께 저장합니다.
    ///
    /// ## 인자
    ///
    /// - `key` - 저장할 Redis 키
    /// - `value` - 저장할 값
    /// - `seconds` - 만료 시간 (초)
    pub async fn set_with_expiry<T: Serialize>(
        &self,
        key: &str,
        value: &T,
        seconds: usize,
    ) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(value)
            .map_err(|e| redis::RedisError::from((redis::ErrorKind::TypeError, "Serialization failed", e.to_string())))?;

        conn.set_ex::<_, _, ()>(key, json, seconds as u64).await?;
        Ok(())
    }

    /// 지정된 키를 삭제합니다.
    ///
    /// 키가 존재하지 않아도 에러가 발생하지 않습니다.
    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(key).await?;
        Ok(())
    }

    /// 여러 키를 한 번에 삭제합니다.
    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(keys).await?;
        Ok(())
    }

    /// 패턴에 매칭되는 모든 키를 조회합니다.
    ///
    /// 캐시 무효화 시 관련 키 그룹을 찾는 데 사용됩니다.
    /// 프로덕션 환경에서 과도한 사용은 피해야 합니다.
    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let keys: Vec<String> = conn.keys(pattern).await?;
        Ok(keys)
    }
}
