// User-facing messages in the configured interface language
use std::fmt::Display;

use crate::config::InterfaceLanguage;

pub struct Messages {
    language: InterfaceLanguage,
}

impl Messages {
    pub fn new(language: InterfaceLanguage) -> Self {
        Self { language }
    }

    pub fn starting_translation(&self, input: impl Display) -> String {
        match self.language {
            InterfaceLanguage::En => format!("Starting translation of {}...", input),
            InterfaceLanguage::Zh => format!("开始翻译 {}...", input),
        }
    }

    pub fn translation_completed(&self, output: impl Display) -> String {
        match self.language {
            InterfaceLanguage::En => format!("Translation completed: {}", output),
            InterfaceLanguage::Zh => format!("翻译完成：{}", output),
        }
    }

    pub fn error(&self, message: impl Display) -> String {
        match self.language {
            InterfaceLanguage::En => format!("Error: {}", message),
            InterfaceLanguage::Zh => format!("错误：{}", message),
        }
    }

    pub fn progress(&self) -> &'static str {
        match self.language {
            InterfaceLanguage::En => "Progress",
            InterfaceLanguage::Zh => "进度",
        }
    }

    pub fn refreshing_models(&self) -> &'static str {
        match self.language {
            InterfaceLanguage::En => "Refreshing Ollama models...",
            InterfaceLanguage::Zh => "正在刷新 Ollama 模型...",
        }
    }

    pub fn found_models(&self, count: usize) -> String {
        match self.language {
            InterfaceLanguage::En => format!("Found {} Ollama models", count),
            InterfaceLanguage::Zh => format!("找到 {} 个 Ollama 模型", count),
        }
    }

    pub fn error_refreshing(&self, message: impl Display) -> String {
        match self.language {
            InterfaceLanguage::En => format!("Error refreshing Ollama models: {}", message),
            InterfaceLanguage::Zh => format!("刷新 Ollama 模型出错：{}", message),
        }
    }

    pub fn no_models(&self) -> &'static str {
        match self.language {
            InterfaceLanguage::En => "No Ollama models available",
            InterfaceLanguage::Zh => "没有可用的 Ollama 模型",
        }
    }

    pub fn enter_api_url(&self) -> &'static str {
        match self.language {
            InterfaceLanguage::En => "Please enter API URL",
            InterfaceLanguage::Zh => "请输入 API 地址",
        }
    }

    pub fn settings_saved(&self, path: impl Display) -> String {
        match self.language {
            InterfaceLanguage::En => format!(
                "Settings saved to {}. Changes apply the next time the application starts.", path
            ),
            InterfaceLanguage::Zh => format!("设置已保存到 {}。更改将在下次启动时生效。", path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_follow_language() {
        let en = Messages::new(InterfaceLanguage::En);
        let zh = Messages::new(InterfaceLanguage::Zh);

        assert_eq!(en.translation_completed("out.txt"), "Translation completed: out.txt");
        assert_eq!(zh.translation_completed("out.txt"), "翻译完成：out.txt");
        assert_eq!(en.found_models(3), "Found 3 Ollama models");
        assert_eq!(zh.no_models(), "没有可用的 Ollama 模型");
    }
}
