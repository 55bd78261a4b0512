// src/save/src/lib.rs

use anyhow::{Context, Result};
use bincode::{Decode, Encode, config};
use error::GameError;
use hero::{Character, Class};
use serde::{Deserialize, Serialize};
use stats::BattleStats;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::SystemTime,
};

/// Current save format version
pub const SAVE_VERSION: u32 = 2;

fn default_version() -> u32 {
    1 // Legacy saves default to version 1
}

/// 存档元数据
#[derive(Debug, Clone, Encode, Decode, Serialize, Deserialize)]
pub struct SaveMetadata {
    pub timestamp: SystemTime,
    pub hero_name: String,
    pub hero_class: Class,
    pub play_time: f64, // 游戏时长(秒)
}

/// 存档数据(包含游戏完整状态)
#[derive(Debug, Encode, Decode, Serialize, Deserialize)]
pub struct SaveData {
    /// Version for backward compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    pub metadata: SaveMetadata,

    pub character: Character,

    /// Battle statistics (v2+)
    #[serde(default)]
    pub stats: BattleStats,

    pub game_seed: u64,
}

impl SaveData {
    /// 用当前角色状态打包一份存档
    pub fn snapshot(character: &Character, stats: &BattleStats, play_time: f64) -> Self {
        Self {
            version: SAVE_VERSION,
            metadata: SaveMetadata {
                timestamp: SystemTime::now(),
                hero_name: character.name.clone(),
                hero_class: character.class,
                play_time,
            },
            character: character.clone(),
            stats: stats.clone(),
            game_seed: character.rng.seed(),
        }
    }

    /// Migrate legacy save data to current version
    pub fn migrate(&mut self) {
        if self.version < SAVE_VERSION {
            match self.version {
                1 => {
                    // v1没有战斗统计，serde default已给出空计数器
                    self.version = 2;
                }
                _ => {
                    // Unknown version, skip migration
                }
            }
        }
    }

    /// Validate save data integrity
    pub fn validate(&self) -> Result<()> {
        if self.character.base_max_hp == 0 {
            return Err(anyhow::anyhow!("Invalid hero HP"));
        }

        if self.character.level == 0 {
            return Err(anyhow::anyhow!("Invalid hero level"));
        }

        if self.character.current_hp > self.character.effective().max_hp {
            return Err(anyhow::anyhow!("Hero HP above effective maximum"));
        }

        Ok(())
    }
}

/// 存档系统
pub struct SaveSystem {
    save_dir: PathBuf,
    max_slots: usize,
}

impl SaveSystem {
    /// 初始化存档系统
    pub fn new(save_dir: impl AsRef<Path>, max_slots: usize) -> Result<Self, GameError> {
        let save_dir = save_dir.as_ref();

        // 创建存档目录(如果不存在)
        if !save_dir.exists() {
            fs::create_dir_all(save_dir).context("Failed to create save directory")?;
        }

        Ok(Self {
            save_dir: save_dir.to_path_buf(),
            max_slots,
        })
    }

    /// 获取所有存档列表(按时间倒序)
    pub fn list_saves(&self) -> Result<Vec<SaveMetadata>, GameError> {
        let mut saves = Vec::new();

        let entries = fs::read_dir(&self.save_dir).context("Failed to read save directory")?;

        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && path.extension().is_some_and(|ext| ext == "sav") {
                let mut file = fs::File::open(&path)
                    .context(format!("Failed to open save file: {:?}", path))?;

                let config = config::standard();
                let data: SaveData = bincode::decode_from_std_read(&mut file, config)
                    .context(format!("Failed to deserialize save file: {:?}", path))?;

                saves.push(data.metadata);
            }
        }

        // 按时间戳排序(最新的在前)
        saves.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        Ok(saves)
    }

    /// 保存游戏状态
    pub fn save_game(&self, slot: usize, data: &SaveData) -> Result<()> {
        if slot >= self.max_slots {
            return Err(anyhow::anyhow!("Invalid save slot"));
        }

        let path = self.slot_path(slot);

        // 先写临时文件再原子重命名，避免写到一半损坏旧档
        let temp_path = path.with_extension("tmp");
        let mut file =
            fs::File::create(&temp_path).context("Failed to create temporary save file")?;

        let config = config::standard();
        bincode::encode_into_std_write(data, &mut file, config)
            .context("Failed to serialize save data")?;

        file.flush().context("Failed to flush save data")?;

        fs::rename(temp_path, path).context("Failed to commit save file")?;

        Ok(())
    }

    /// 加载游戏状态
    pub fn load_game(&self, slot: usize) -> Result<SaveData> {
        if slot >= self.max_slots {
            return Err(anyhow::anyhow!("Invalid save slot"));
        }

        let path = self.slot_path(slot);
        let mut file = fs::File::open(&path).context(format!("Save file not found: {:?}", path))?;

        let config = config::standard();
        let mut data: SaveData = bincode::decode_from_std_read(&mut file, config)
            .context("Failed to deserialize save data")?;

        data.migrate();
        data.validate().context("Save data validation failed")?;

        Ok(data)
    }

    /// 删除存档
    pub fn delete_save(&self, slot: usize) -> Result<()> {
        if slot >= self.max_slots {
            return Err(anyhow::anyhow!("Invalid save slot"));
        }

        let path = self.slot_path(slot);
        if path.exists() {
            fs::remove_file(path).context("Failed to delete save file")?;
        }

        Ok(())
    }

    /// 检查指定槽位是否有存档
    pub fn has_save(&self, slot: usize) -> bool {
        slot < self.max_slots && self.slot_path(slot).exists()
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    pub fn max_slots(&self) -> usize {
        self.max_slots
    }

    fn slot_path(&self, slot: usize) -> PathBuf {
        self.save_dir.join(format!("save_{}.sav", slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hero::Class;

    fn sample_save() -> SaveData {
        let character = Character::with_seed("存档测试".to_string(), Class::Mage, 77);
        SaveData::snapshot(&character, &BattleStats::new(), 12.5)
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let system = SaveSystem::new(dir.path(), 3).unwrap();
        let data = sample_save();

        system.save_game(0, &data).unwrap();
        assert!(system.has_save(0));

        let loaded = system.load_game(0).unwrap();
        assert_eq!(loaded.version, SAVE_VERSION);
        assert_eq!(loaded.character, data.character);
        assert_eq!(loaded.game_seed, 77);
    }

    #[test]
    fn invalid_slot_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let system = SaveSystem::new(dir.path(), 3).unwrap();

        assert!(system.save_game(3, &sample_save()).is_err());
        assert!(system.load_game(3).is_err());
        assert!(!system.has_save(3));
    }

    #[test]
    fn delete_removes_the_slot() {
        let dir = tempfile::tempdir().unwrap();
        let system = SaveSystem::new(dir.path(), 3).unwrap();

        system.save_game(1, &sample_save()).unwrap();
        system.delete_save(1).unwrap();
        assert!(!system.has_save(1));

        // 删除空槽位不报错
        system.delete_save(1).unwrap();
    }

    #[test]
    fn list_saves_returns_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let system = SaveSystem::new(dir.path(), 3).unwrap();

        system.save_game(0, &sample_save()).unwrap();
        system.save_game(1, &sample_save()).unwrap();

        let saves = system.list_saves().unwrap();
        assert_eq!(saves.len(), 2);
        assert_eq!(saves[0].hero_name, "存档测试");
    }

    #[test]
    fn corrupted_hp_fails_validation() {
        let mut data = sample_save();
        data.character.current_hp = data.character.effective().max_hp + 100;
        assert!(data.validate().is_err());
    }
}
