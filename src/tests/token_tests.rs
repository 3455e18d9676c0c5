//! 标记描述符单元测试
//!
//! 基于 "显式配置，文档化默认值" 的设计理念进行测试
//!
//! ## 测试重点
//! - **默认值正确性**：新建描述符的每个属性都处于文档化默认状态
//! - **构建器行为**：链式设置器的取值替换与追加语义
//! - **序列化稳定性**：描述符可以无损地序列化与反序列化

use super::test_helpers::*;
use crate::{MockJwtToken, SetupTiming, DEFAULT_TOKEN};

// ==================== 描述符默认值与构建器测试 ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_defaults() {
        let marker = create_minimal_token();
        let context = marker.to_security_context().expect("defaults should build");
        let authentication = context.authentication();

        // 默认角色为 ["USER"]，即 ROLE_USER
        assert_eq!(authentication.authorities(), ["ROLE_USER".to_string()]);
        // 默认令牌为固定占位符
        assert_eq!(authentication.jwt().token_value(), DEFAULT_TOKEN);
        // 其余属性全部缺省
        assert_eq!(authentication.jwt().claims().len(), 1, "Only sub should be set");
        assert_eq!(marker.setup_timing(), SetupTiming::TestMethod);
    }

    #[test]
    fn test_builder_replaces_values() {
        let marker = create_minimal_token()
            .scope(["a"])
            .scope(["b", "c"])
            .roles(["X"])
            .roles(["Y"]);
        let context = marker.to_security_context().expect("marker should build");

        // 设置器采用替换语义，最后一次调用生效
        assert_eq!(
            string_set_claim(context.authentication().token_attributes(), "scope"),
            vec!["b".to_string(), "c".to_string()]
        );
        assert_eq!(
            context.authentication().authorities(),
            ["ROLE_Y".to_string()]
        );
    }

    #[test]
    fn test_additional_claim_appends() {
        let marker = create_minimal_token()
            .additional_claim("a", "1")
            .additional_claim("b", "2");
        let context = marker.to_security_context().expect("marker should build");

        let claims = context.authentication().token_attributes();
        assert_eq!(claims.get("a"), Some(&json!("1")));
        assert_eq!(claims.get("b"), Some(&json!("2")));
    }

    #[test]
    fn test_setup_timing_flag() {
        let marker = create_minimal_token().setup_before(SetupTiming::TestExecution);
        assert_eq!(marker.setup_timing(), SetupTiming::TestExecution);

        // 标记仅携带该属性，不影响上下文内容
        let timed = marker.to_security_context().expect("marker should build");
        let plain = create_minimal_token()
            .to_security_context()
            .expect("marker should build");
        assert_eq!(timed, plain);
    }

    #[test]
    fn test_descriptor_serialization() {
        let marker = create_test_token().roles(["ADMIN"]);

        let serialized = serde_json::to_string(&marker).expect("descriptor should serialize");
        let deserialized: MockJwtToken =
            serde_json::from_str(&serialized).expect("descriptor should deserialize");

        assert_eq!(deserialized, marker);
    }
}
