//! Calico service plugin verbs.

use vpplink_api::binapi::calico::{CalicoAddDelIntfNat4, CalicoAddDelIntfNat6};
use vpplink_api::Channel;

use crate::error::Result;
use crate::link::VppLink;
use crate::types::{CalicoAs, CalicoVip, SnatEntry};

impl<C: Channel> VppLink<C> {
    pub fn calico_add_interface_nat4(&self, sw_if_index: u32) -> Result<()> {
        let request = CalicoAddDelIntfNat4 {
            is_add: true,
            sw_if_index,
        };
        self.call("calico_add_interface_nat4", &request, || sw_if_index.to_string())?;
        Ok(())
    }

    pub fn calico_del_interface_nat4(&self, sw_if_index: u32) -> Result<()> {
        let request = CalicoAddDelIntfNat4 {
            is_add: false,
            sw_if_index,
        };
        self.call("calico_del_interface_nat4", &request, || sw_if_index.to_string())?;
        Ok(())
    }

    pub fn calico_add_interface_nat6(&self, sw_if_index: u32) -> Result<()> {
        let request = CalicoAddDelIntfNat6 {
            is_add: true,
            sw_if_index,
        };
        self.call("calico_add_interface_nat6", &request, || sw_if_index.to_string())?;
        Ok(())
    }

    pub fn calico_del_interface_nat6(&self, sw_if_index: u32) -> Result<()> {
        let request = CalicoAddDelIntfNat6 {
            is_add: false,
            sw_if_index,
        };
        self.call("calico_del_interface_nat6", &request, || sw_if_index.to_string())?;
        Ok(())
    }

    pub fn calico_add_as(&self, backend: &CalicoAs) -> Result<()> {
        self.call("calico_add_as", &backend.to_wire(true), || format!("{backend:?}"))?;
        Ok(())
    }

    pub fn calico_del_as(&self, backend: &CalicoAs) -> Result<()> {
        self.call("calico_del_as", &backend.to_wire(false), || format!("{backend:?}"))?;
        Ok(())
    }

    pub fn calico_add_vip(&self, vip: &CalicoVip) -> Result<()> {
        self.call("calico_add_vip", &vip.to_wire(true), || format!("{vip:?}"))?;
        Ok(())
    }

    pub fn calico_del_vip(&self, vip: &CalicoVip) -> Result<()> {
        self.call("calico_del_vip", &vip.to_wire(false), || format!("{vip:?}"))?;
        Ok(())
    }

    pub fn calico_add_snat_entry(&self, entry: &SnatEntry) -> Result<()> {
        self.call("calico_add_snat_entry", &entry.to_wire(true), || format!("{entry:?}"))?;
        Ok(())
    }

    pub fn calico_del_snat_entry(&self, entry: &SnatEntry) -> Result<()> {
        self.call("calico_del_snat_entry", &entry.to_wire(false), || format!("{entry:?}"))?;
        Ok(())
    }
}
